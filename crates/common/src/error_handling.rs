use std::error::Error;

pub type AnyErr = Box<dyn Error + Send + Sync>;
pub type MyResult<T> = Result<T, AnyErr>;
pub trait MyResultTrait<T> {
    fn my_result(self) -> MyResult<T>;
    fn result_str(self) -> Result<T, String>;
}
impl<T, Err: Into<AnyErr>> MyResultTrait<T> for Result<T, Err> {
    fn my_result(self) -> MyResult<T> {
        self.map_err(|e| e.into())
    }
    fn result_str(self) -> Result<T, String> {
        self.map_err(|e| e.into().to_string())
    }
}

/// An outcome that may carry a value even though part of the work failed.
///
/// Generation runs keep every artifact they managed to build; the error
/// side only summarizes what was left out.
#[derive(Debug)]
pub enum Warning<T> {
    Ok(T),
    Partial(T, AnyErr),
}

impl<T> Warning<T> {
    pub fn from<E: Into<AnyErr>>(partial: T, might_err: Option<E>) -> Self {
        match might_err {
            Some(err) => Warning::Partial(partial, err.into()),
            None => Warning::Ok(partial),
        }
    }
    pub fn into_value(self) -> T {
        match self {
            Warning::Ok(v) | Warning::Partial(v, _) => v,
        }
    }
    pub fn is_partial(&self) -> bool {
        matches!(self, Warning::Partial(..))
    }
}
