pub mod build;
pub mod inspect;

#[cfg(feature = "watch")]
pub mod watch;
