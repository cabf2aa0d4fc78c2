//! `define_port_error!`: declares a port error enum with `thiserror`
//! messages and one snake_case constructor per variant.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbePortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Timeout { seconds: u64 } => "timed out after {seconds}s",
            Rejected { message: String, code: i32 } => "rejected ({code}): {message}",
        }
    }

    #[test]
    fn string_fields_accept_str_slices() {
        let err = ProbePortError::unreachable("dns lookup failed");
        assert_eq!(err.to_string(), "store unreachable: dns lookup failed");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = ProbePortError::timeout(10_u64);
        assert_eq!(err, ProbePortError::Timeout { seconds: 10 });
    }

    #[test]
    fn mixed_fields_render_in_message() {
        let err = ProbePortError::rejected("bad filter", 2_i32);
        assert_eq!(err.to_string(), "rejected (2): bad filter");
    }
}
