use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Cli(String),
    Conf(String),
    Reqwest(reqwest::Error),
    Url(url::ParseError),
    StoreApi(String),
    OverpassApi(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Cli(err) => write!(f, "{}", err),
            Error::Conf(err) => write!(f, "{}", err),
            Error::Reqwest(err) => err.fmt(f),
            Error::Url(err) => err.fmt(f),
            Error::StoreApi(err) => write!(f, "{}", err),
            Error::OverpassApi(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Reqwest(error)
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::Url(error)
    }
}
