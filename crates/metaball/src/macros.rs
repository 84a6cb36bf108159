#[macro_export]
macro_rules! impl_scalar_newtype {
    ($name:ty, $inner:ty) => {
        impl $name {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }
    };
}
