use crate::{Error, Result};
use std::env;

static DEFAULT_SUPABASE_URL: &str = "https://lyijydkwitjxbcxurkep.supabase.co";

pub struct Conf {
    pub supabase_url: String,
    pub service_key: String,
    pub dry_run: bool,
}

impl Conf {
    pub fn from_env(dry_run: bool) -> Result<Conf> {
        Conf::new(
            env::var("SUPABASE_URL").unwrap_or_else(|_| DEFAULT_SUPABASE_URL.into()),
            env::var("SUPABASE_SERVICE_KEY").unwrap_or_default(),
            dry_run,
        )
    }

    pub fn new(supabase_url: String, service_key: String, dry_run: bool) -> Result<Conf> {
        if service_key.is_empty() && !dry_run {
            return Err(Error::Conf(
                "SUPABASE_SERVICE_KEY environment variable is not set".into(),
            ));
        }
        Ok(Conf {
            supabase_url,
            service_key,
            dry_run,
        })
    }

    #[cfg(test)]
    pub fn mock(dry_run: bool) -> Conf {
        Conf {
            supabase_url: "http://localhost:54321".into(),
            service_key: "".into(),
            dry_run,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Conf;
    use crate::Result;

    #[test]
    fn missing_service_key_is_fatal() {
        assert!(Conf::new("http://localhost".into(), "".into(), false).is_err());
    }

    #[test]
    fn dry_run_tolerates_missing_service_key() -> Result<()> {
        let conf = Conf::new("http://localhost".into(), "".into(), true)?;
        assert!(conf.dry_run);
        Ok(())
    }

    #[test]
    fn service_key_is_kept() -> Result<()> {
        let conf = Conf::new("http://localhost".into(), "secret".into(), false)?;
        assert_eq!("secret", conf.service_key);
        Ok(())
    }
}
