//! Error enums for the outbound ports.
//!
//! Every port (stock ledger, request log, user repository, credentials)
//! reports failures through its own enum so a use case can tell a lost
//! connection from a failed statement and pick the right status code. The
//! enums only differ in variants and messages, so they are generated here
//! together with one snake_case constructor per variant.

/// Declare a port error enum.
///
/// Each `Variant { field: Type } => "message"` line becomes a `thiserror`
/// variant plus a `variant(field: impl Into<Type>)` constructor, so adapters
/// can write `RequestLogError::query(err.to_string())`:
///
/// ```ignore
/// define_port_error! {
///     /// Errors raised by stock ledger adapters.
///     pub enum StockLedgerError {
///         /// Pool checkout or connection failure.
///         Connection { message: String } => "stock ledger connection failed: {message}",
///     }
/// }
/// ```
macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;
