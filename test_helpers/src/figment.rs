//! Shared helpers for working with `figment::Jail` in tests.
//!
//! These utilities centralise the common pattern of initialising a jail,
//! writing configuration files into it, and turning a provider chain into a
//! [`Record`] ready for construction.

use anyhow::{Result, anyhow};
use configable::record::{self, Record};
use figment::Figment;
use figment::providers::{Format, Toml};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down automatically once the closure completes, even when
/// the closure returns an error. Failures are converted into `anyhow::Error`
/// values so callers can use the `?` operator without extra boilerplate.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `file_name` inside a jail and extracts it as a record.
///
/// # Errors
///
/// Returns an error when the file cannot be written or does not parse into
/// a TOML table.
pub fn toml_record(file_name: &str, contents: &str) -> Result<Record> {
    with_jail(|j| {
        j.create_file(file_name, contents)?;
        let figment = Figment::from(Toml::file(file_name));
        record::from_figment(&figment).map_err(|err| figment_error(&*err))
    })
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Helpful when bridging between crate errors and closures that must return
/// a figment-specific error type.
pub fn figment_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
