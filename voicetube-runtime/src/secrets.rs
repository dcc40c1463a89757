use anyhow::Context;

// Changing this would strand keys stored by earlier builds.
const SERVICE: &str = "voicetube";

/// Takes precedence over the keyring.
pub const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    YouTubeApiKey,
}

impl SecretKey {
    fn account(self) -> &'static str {
        match self {
            SecretKey::YouTubeApiKey => "youtube_api_key",
        }
    }

    fn entry(self) -> anyhow::Result<keyring::Entry> {
        keyring::Entry::new(SERVICE, self.account())
            .with_context(|| format!("open keyring entry {}", self.account()))
    }
}

pub fn set_secret(key: SecretKey, value: &str) -> anyhow::Result<()> {
    key.entry()?
        .set_password(value)
        .with_context(|| format!("store {}", key.account()))
}

pub fn get_secret(key: SecretKey) -> anyhow::Result<Option<String>> {
    match key.entry()?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::Error::new(e)).with_context(|| format!("read {}", key.account())),
    }
}

/// Removing an absent secret is not an error.
pub fn delete_secret(key: SecretKey) -> anyhow::Result<()> {
    match key.entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)).with_context(|| format!("delete {}", key.account())),
    }
}

/// Env first, then keyring. A broken keyring is logged and treated as "no key":
/// without a key every search simply takes the fallback path.
pub fn resolve_youtube_api_key() -> Option<String> {
    let from_env = std::env::var(YOUTUBE_API_KEY_ENV).ok();
    pick_api_key(from_env, || match get_secret(SecretKey::YouTubeApiKey) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("keyring lookup failed: {e:#}");
            None
        }
    })
}

fn pick_api_key(from_env: Option<String>, keyring: impl FnOnce() -> Option<String>) -> Option<String> {
    from_env
        .filter(|v| !v.trim().is_empty())
        .or_else(|| keyring().filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
}
