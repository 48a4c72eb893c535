//! Component locks: a named, non-overlapping reservation of components held
//! by a service for a bounded lifetime.

use hms_xname::{is_valid, normalize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompLockError {
    #[error("invalid component lock lifetime {0}")]
    BadLifetime(i64),
    #[error("component lock member '{0}' is not a valid xname")]
    InvalidXname(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompLock {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub lifetime: i64,
    #[serde(default)]
    pub xnames: Vec<String>,
    #[serde(skip)]
    normalized: bool,
    #[serde(skip)]
    verified: bool,
}

impl CompLock {
    pub fn new<I, S>(
        reason: impl Into<String>,
        owner: impl Into<String>,
        lifetime: i64,
        xnames: I,
    ) -> Result<Self, CompLockError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lock = CompLock {
            reason: reason.into(),
            owner: owner.into(),
            lifetime,
            xnames: xnames.into_iter().map(|x| x.as_ref().to_string()).collect(),
            ..CompLock::default()
        };
        lock.normalize();
        lock.verify()?;
        Ok(lock)
    }

    /// Puts every member xname in canonical form. Runs once.
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        self.normalized = true;
        for xname in &mut self.xnames {
            *xname = normalize(xname);
        }
    }

    /// Checks the lock is fit to store. Only a passing result is remembered.
    pub fn verify(&mut self) -> Result<(), CompLockError> {
        if self.verified {
            return Ok(());
        }
        if self.lifetime <= 0 {
            return Err(CompLockError::BadLifetime(self.lifetime));
        }
        if let Some(bad) = self.xnames.iter().find(|x| !is_valid(x)) {
            return Err(CompLockError::InvalidXname(bad.clone()));
        }
        self.verified = true;
        Ok(())
    }
}

/// Fields of a lock that may be updated in place. Keys match `CompLock`;
/// capitalized keys are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompLockPatch {
    #[serde(default, alias = "Reason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, alias = "Owner", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, alias = "Lifetime", skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<i64>,
}

impl CompLockPatch {
    pub fn verify(&self) -> Result<(), CompLockError> {
        match self.lifetime {
            Some(lifetime) if lifetime <= 0 => Err(CompLockError::BadLifetime(lifetime)),
            _ => Ok(()),
        }
    }

    pub fn apply(&self, lock: &mut CompLock) -> Result<(), CompLockError> {
        self.verify()?;
        if let Some(reason) = &self.reason {
            lock.reason.clone_from(reason);
        }
        if let Some(owner) = &self.owner {
            lock.owner.clone_from(owner);
        }
        if let Some(lifetime) = self.lifetime {
            lock.lifetime = lifetime;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_members() {
        let lock = CompLock::new("maint", "fw-svc", 60, ["X0C0S0B0N01", "x0c0s1"]).unwrap();
        assert_eq!(lock.xnames, vec!["x0c0s0b0n1", "x0c0s1"]);
        assert_eq!(lock.lifetime, 60);
    }

    #[test]
    fn rejects_bad_lifetime_and_members() {
        assert_eq!(
            CompLock::new("r", "o", 0, ["x0c0s0"]).unwrap_err(),
            CompLockError::BadLifetime(0)
        );
        assert_eq!(
            CompLock::new("r", "o", 10, ["x0c0s0", "bogus"]).unwrap_err(),
            CompLockError::InvalidXname("bogus".into())
        );
    }

    #[test]
    fn failed_verify_is_not_remembered() {
        let mut lock = CompLock {
            lifetime: -1,
            xnames: vec!["x0c0".into()],
            ..CompLock::default()
        };
        assert!(lock.verify().is_err());
        assert!(lock.verify().is_err());
        lock.lifetime = 5;
        assert!(lock.verify().is_ok());
    }

    #[test]
    fn patch_checks_lifetime_only_when_present() {
        assert!(CompLockPatch::default().verify().is_ok());
        let patch = CompLockPatch {
            lifetime: Some(-3),
            ..CompLockPatch::default()
        };
        assert_eq!(patch.verify(), Err(CompLockError::BadLifetime(-3)));

        let mut lock = CompLock::new("r", "o", 10, ["x0"]).unwrap();
        CompLockPatch {
            owner: Some("new-owner".into()),
            lifetime: Some(30),
            ..CompLockPatch::default()
        }
        .apply(&mut lock)
        .unwrap();
        assert_eq!(lock.owner, "new-owner");
        assert_eq!(lock.lifetime, 30);
        assert_eq!(lock.reason, "r");
    }

    #[test]
    fn patch_reads_lowercase_and_capitalized_keys() {
        let patch: CompLockPatch =
            serde_json::from_str(r#"{"reason":"r2","owner":"o2","lifetime":-5}"#).unwrap();
        assert_eq!(patch.reason.as_deref(), Some("r2"));
        assert_eq!(patch.owner.as_deref(), Some("o2"));
        assert_eq!(patch.lifetime, Some(-5));

        let mut lock = CompLock::new("r", "o", 10, ["x0"]).unwrap();
        assert_eq!(patch.apply(&mut lock), Err(CompLockError::BadLifetime(-5)));
        assert_eq!(lock.lifetime, 10);
        assert_eq!(lock.owner, "o");

        let patch: CompLockPatch =
            serde_json::from_str(r#"{"Owner":"o3","Lifetime":20}"#).unwrap();
        patch.apply(&mut lock).unwrap();
        assert_eq!(lock.owner, "o3");
        assert_eq!(lock.lifetime, 20);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"owner": "o3", "lifetime": 20})
        );
    }

    #[test]
    fn serializes_with_lowercase_keys() {
        let lock = CompLock::new("r", "o", 10, ["x0"]).unwrap();
        let v = serde_json::to_value(&lock).unwrap();
        assert_eq!(v["lifetime"], 10);
        assert_eq!(v["xnames"][0], "x0");
        assert!(v.get("created").is_none());
    }
}
