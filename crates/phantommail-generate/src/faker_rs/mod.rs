pub mod adapter;
pub mod locales;

pub use adapter::FakeRsAdapter;
pub use locales::LocaleKey;
