//! Declarative generators for entity structs and tagged families.

/// Generate an entity struct plus its schema and codec impls.
///
/// The first token selects the wire shape: `tagged` entities carry
/// `{"type": "<StructName>"}`, `untagged` ones do not.
macro_rules! entity {
    (tagged $($rest:tt)*) => {
        entity!(@impl Tagged $($rest)*);
    };
    (untagged $($rest:tt)*) => {
        entity!(@impl Untagged $($rest)*);
    };
    (@impl $tagging:ident
        $(#[$meta:meta])*
        struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $name {
            pub fn schema() -> &'static $crate::entity::schema::Schema {
                static SCHEMA: ::std::sync::OnceLock<$crate::entity::schema::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::entity::schema::Schema::new(
                        stringify!($name),
                        $crate::entity::schema::Tagging::$tagging,
                        vec![ $( (stringify!($field), <$ty as $crate::entity::Wire>::kind()) ),* ],
                    )
                })
            }
        }

        impl $crate::entity::Entity for $name {
            #[allow(unused_mut, unused_variables)]
            fn to_json(&self) -> ::serde_json::Value {
                let schema = Self::schema();
                let mut obj = schema.start_object();
                let mut fields = schema.fields().iter();
                $(
                    if let Some(desc) = fields.next() {
                        obj.insert(
                            desc.wire_name().to_owned(),
                            $crate::entity::Wire::encode(&self.$field),
                        );
                    }
                )*
                ::serde_json::Value::Object(obj)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_json(value: &::serde_json::Value) -> $crate::error::Result<Self> {
                let schema = Self::schema();
                let obj = schema.open(value)?;
                let mut fields = schema.fields().iter();
                Ok(Self {
                    $( $field: schema.decode_next(obj, fields.next())?, )*
                })
            }
        }

        impl $crate::entity::Wire for $name {
            fn kind() -> $crate::entity::schema::FieldKind {
                $crate::entity::schema::FieldKind::Entity(stringify!($name))
            }

            fn encode(&self) -> ::serde_json::Value {
                $crate::entity::Entity::to_json(self)
            }

            fn decode(value: &::serde_json::Value) -> $crate::error::Result<Self> {
                $crate::entity::Entity::from_json(value)
            }
        }
    };
}

/// Generate a closed, tag-dispatched family over already-defined tagged entities.
///
/// Each variant wraps the struct of the same name; the struct name is the tag.
macro_rules! family {
    (
        $(#[$meta:meta])*
        enum $family:ident {
            $( $variant:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $family {
            $( $variant($variant), )*
        }

        impl $family {
            pub const FAMILY: &'static str = stringify!($family);

            /// Tag of the wrapped variant.
            pub fn tag(&self) -> &'static str {
                match self {
                    $( $family::$variant(_) => stringify!($variant), )*
                }
            }

            /// Every tag of this family, in declaration order.
            pub fn tags() -> &'static [&'static str] {
                &[ $( stringify!($variant) ),* ]
            }

            pub fn is_known_tag(tag: &str) -> bool {
                Self::registry().contains_key(tag)
            }

            #[allow(clippy::type_complexity)]
            fn registry() -> &'static ::std::collections::HashMap<
                &'static str,
                fn(&::serde_json::Value) -> $crate::error::Result<$family>,
            > {
                static REGISTRY: ::std::sync::OnceLock<
                    ::std::collections::HashMap<
                        &'static str,
                        fn(&::serde_json::Value) -> $crate::error::Result<$family>,
                    >,
                > = ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    let mut map: ::std::collections::HashMap<
                        &'static str,
                        fn(&::serde_json::Value) -> $crate::error::Result<$family>,
                    > = ::std::collections::HashMap::new();
                    $(
                        map.insert(stringify!($variant), |value: &::serde_json::Value| {
                            <$variant as $crate::entity::Entity>::from_json(value)
                                .map($family::$variant)
                        });
                    )*
                    map
                })
            }
        }

        impl $crate::entity::Entity for $family {
            fn to_json(&self) -> ::serde_json::Value {
                match self {
                    $( $family::$variant(inner) => $crate::entity::Entity::to_json(inner), )*
                }
            }

            fn from_json(value: &::serde_json::Value) -> $crate::error::Result<Self> {
                let tag = $crate::entity::schema::read_tag(value, Self::FAMILY)?;
                let decode = Self::registry().get(tag).ok_or_else(|| {
                    $crate::error::MiraiError::UnknownTag {
                        family: Self::FAMILY,
                        tag: tag.to_owned(),
                    }
                })?;
                decode(value)
            }
        }

        impl $crate::entity::Wire for $family {
            fn kind() -> $crate::entity::schema::FieldKind {
                $crate::entity::schema::FieldKind::Entity(Self::FAMILY)
            }

            fn encode(&self) -> ::serde_json::Value {
                $crate::entity::Entity::to_json(self)
            }

            fn decode(value: &::serde_json::Value) -> $crate::error::Result<Self> {
                $crate::entity::Entity::from_json(value)
            }
        }

        $(
            impl From<$variant> for $family {
                fn from(inner: $variant) -> Self {
                    $family::$variant(inner)
                }
            }
        )*
    };
}
