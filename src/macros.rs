// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, &str slices
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Declare a flat all-`String` row type together with its column list.
///
/// The struct field order *is* the CSV column order; `FIELDS` is derived from
/// the same token list so the header can never drift from the serde layout.
#[macro_export]
macro_rules! string_row {
    (
        $(#[$meta:meta])*
        pub struct $name:ident { $($(#[$fmeta:meta])* $field:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $( $(#[$fmeta])* pub $field: ::std::string::String, )+
        }

        impl $name {
            /// Column names, in output order.
            pub const FIELDS: &'static [&'static str] = &[ $( stringify!($field) ),+ ];
        }
    };
}
