/// Line-oriented text builder that keeps nesting consistent across
/// namespace, type, member and body levels.
#[derive(Debug, Clone)]
pub struct IndentWriter {
    out: String,
    level: usize,
    unit: String,
}

impl IndentWriter {
    pub fn new<U: Into<String>>(unit: U) -> Self {
        Self { out: String::new(), level: 0, unit: unit.into() }
    }
    pub fn line<S: AsRef<str>>(&mut self, s: S) -> &mut Self {
        for _ in 0..self.level {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(s.as_ref());
        self.out.push('\n');
        self
    }
    /// Writes every line of an already formatted fragment at the current level.
    pub fn fragment<S: AsRef<str>>(&mut self, s: S) -> &mut Self {
        for l in s.as_ref().lines() {
            if l.is_empty() {
                self.blank();
            } else {
                self.line(l);
            }
        }
        self
    }
    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }
    /// `header {` followed by one more level of nesting.
    pub fn open<S: AsRef<str>>(&mut self, header: S) -> &mut Self {
        self.line(format!("{} {{", header.as_ref()));
        self.level += 1;
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self.line("}")
    }
    pub fn level(&self) -> usize {
        self.level
    }
    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for IndentWriter {
    fn default() -> Self {
        Self::new("    ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_and_unwinds() {
        let mut w = IndentWriter::new("  ");
        w.open("namespace Lib").open("public interface IRun").line("void Run();");
        assert_eq!(w.level(), 2);
        w.close().close();
        assert_eq!(w.finish(), "namespace Lib {\n  public interface IRun {\n    void Run();\n  }\n}\n");
    }

    #[test]
    fn fragment_indents_each_line() {
        let mut w = IndentWriter::default();
        w.open("class A").fragment("void B() {\n    C();\n}").close();
        assert_eq!(w.finish(), "class A {\n    void B() {\n        C();\n    }\n}\n");
    }
}
