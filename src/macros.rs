// src/macros.rs

/// `String::from` shorthand, used for owned record fields and messages.
#[macro_export]
macro_rules! s {
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
