//! Helper macro generating domain port error enums.
//!
//! Port errors share a shape: a small `thiserror` enum whose variants are
//! either unit markers or carry a `message: String`. The macro generates the
//! enum plus snake_case constructors so adapters never spell out struct
//! variant syntax at call sites.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { message: $msg_ty:ty } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { #[doc = "Adapter-provided failure detail."] message: $msg_ty } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { message: $msg_ty } )?);
            )*
        }
    };

    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { message: $msg_ty:ty }) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                Self::$variant { message: message.into() }
            }
        }
    };
}

pub(crate) use define_port_error;
