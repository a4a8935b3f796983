/// Identifier-ish comparisons shared by the matcher and the descriptor model.
pub trait StrCaseExt: AsRef<str> {
    /// Type names compare equal regardless of ASCII and Unicode case.
    fn eq_ignore_case<O: AsRef<str>>(&self, other: O) -> bool {
        let (a, b) = (self.as_ref(), other.as_ref());
        a.len() == b.len() && a.eq_ignore_ascii_case(b)
            || a.to_lowercase() == b.to_lowercase()
    }
    fn is_blank(&self) -> bool {
        self.as_ref().trim().is_empty()
    }
}
impl <S: AsRef<str> + ?Sized> StrCaseExt for S {}

// Turns Option<Vec<T>> into Vec<T>.
pub trait OptionVecTrait {
    type Output;
    fn to_vec(self) -> Vec<Self::Output>;
}

impl <T> OptionVecTrait for Option<Vec<T>> {
    type Output = T;
    fn to_vec(self) -> Vec<T> {
        self.unwrap_or_default()
    }
}
