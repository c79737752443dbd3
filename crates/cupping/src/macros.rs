#[macro_export]
macro_rules! impl_string_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }
    };
}

/// Adds `generate()` (random v4 uuid) on top of `impl_string_newtype!`.
#[macro_export]
macro_rules! impl_id_newtype {
    ($name:ty) => {
        $crate::impl_string_newtype!($name);

        impl $name {
            pub fn generate() -> Self {
                Self::new(uuid::Uuid::new_v4().to_string())
            }
        }
    };
}
