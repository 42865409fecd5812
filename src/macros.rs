//! macros used by folio

/// implement [`Validate`](crate::config::validate::Validate) for a config section
/// whose fields are all `Option`s, checking each present value against a predicate
#[macro_export]
macro_rules! validator {
    ($struct_name:ty, $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? ) => {
        impl Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Some(ref value) = self.$field {
                        if !($requirement)(value) {
                            errors.push(format!("{}: {}", stringify!($field), $err_msg));
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// like [`validator!`], but also validates nested sections and prefixes their errors
#[macro_export]
macro_rules! validator_nested {
    ($struct_name:ty,
        fields: { $( $field:ident => $requirement:expr, $err_msg:expr );* $(;)? }
        nested: { $( $nested:ident );* $(;)? }
    ) => {
        impl Validate for $struct_name {
            fn validate(&self) -> Result<(), Vec<String>> {
                let mut errors: Vec<String> = Vec::new();

                $(
                    if let Some(ref value) = self.$field {
                        if !($requirement)(value) {
                            errors.push(format!("{}: {}", stringify!($field), $err_msg));
                        }
                    }
                )*

                $(
                    if let Some(ref nested) = self.$nested {
                        if let Err(nested_errors) = nested.validate() {
                            for err in nested_errors {
                                errors.push(format!("{}.{}", stringify!($nested), err));
                            }
                        }
                    }
                )*

                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors)
                }
            }
        }
    };
}

/// get a config section, falling back to its built-in default
///
/// `getopt!(section logging)` gives the whole `[logging]` table.
#[macro_export]
macro_rules! getopt {
    (section $lvl1:ident) => {{
        $crate::config::instance::get_or_default(
            |c| c.$lvl1.clone(),
            $crate::config::options::FolioCfg::default()
                .$lvl1
                .expect(concat!("Default section missing for: ", stringify!($lvl1))),
        )
    }};
}
