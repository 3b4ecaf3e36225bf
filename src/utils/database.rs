use sqlx::{postgres::PgPoolOptions, PgPool};

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

pub async fn connect(database_url: &str) -> DatabaseConnection {
    DatabaseConnection {
        pool: PgPoolOptions::new()
            .max_connections(4)
            .connect(database_url)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("{:}", e);
                panic!("Error connecting to database {}", database_url)
            }),
    }
}

#[cfg(test)]
pub fn connect_lazy(database_url: &str) -> DatabaseConnection {
    DatabaseConnection {
        pool: PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(database_url)
            .unwrap_or_else(|e| panic!("Invalid database url {}: {}", database_url, e)),
    }
}

pub async fn migrate(db_conn: DatabaseConnection) {
    match sqlx::migrate!().run(&db_conn.pool).await {
        Ok(_) => (),
        Err(err) => {
            tracing::error!("{}", err);
            panic!("Failed to run database migrations");
        }
    }
}

/// Stores a string-backed enum in a `TEXT` column.
///
/// The type must provide `as_str()` and a `FromStr` impl whose error is a `String`.
#[macro_export]
macro_rules! text_column {
    ($t:ty) => {
        impl ::sqlx::Type<::sqlx::Postgres> for $t {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <::std::string::String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <::std::string::String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $t {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::std::result::Result<Self, ::sqlx::error::BoxDynError> {
                let raw = <&str as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                raw.parse::<$t>().map_err(::std::convert::Into::into)
            }
        }

        impl<'q> ::sqlx::Encode<'q, ::sqlx::Postgres> for $t {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::sqlx::encode::IsNull {
                <&str as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    // a local alias must not leak into the generated impls
    #[allow(dead_code)]
    type Result<T> = std::result::Result<T, ()>;

    #[derive(Debug, PartialEq)]
    enum Shade {
        Light,
        Dark,
    }

    impl Shade {
        fn as_str(&self) -> &'static str {
            match self {
                Shade::Light => "LIGHT",
                Shade::Dark => "DARK",
            }
        }
    }

    impl FromStr for Shade {
        type Err = String;

        fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
            match s {
                "LIGHT" => Ok(Shade::Light),
                "DARK" => Ok(Shade::Dark),
                _ => Err(format!("Unknown shade {}", s)),
            }
        }
    }

    crate::text_column!(Shade);

    #[test]
    fn text_columns_display_their_stored_value() {
        assert_eq!(Shade::Dark.to_string(), "DARK");
        assert_eq!("LIGHT".parse::<Shade>(), Ok(Shade::Light));
        assert!(<Shade as sqlx::Type<sqlx::Postgres>>::compatible(
            &<String as sqlx::Type<sqlx::Postgres>>::type_info()
        ));
    }
}
