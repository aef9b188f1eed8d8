use crate::Result;

pub use arbor_core::{
    driver::{
        operation::{self, Operation},
        Capability, Connection, Driver, Response, Rows,
    },
    schema::db::Schema,
};

#[cfg(feature = "sqlite")]
pub use arbor_driver_sqlite::Sqlite;

use url::Url;

/// A driver selected by the scheme of a connection URL.
#[derive(Debug)]
pub struct Connect {
    url: Url,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(anyhow::Error::from)?;

        match url.scheme() {
            "sqlite" => Ok(Self { url }),
            scheme => Err(anyhow::anyhow!(
                "unsupported database; scheme={scheme}; url={url}"
            )
            .into()),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    #[cfg(feature = "sqlite")]
    async fn connect_sqlite(&self) -> Result<Box<dyn Connection>> {
        arbor_driver_sqlite::Sqlite::new(self.url.as_str())?
            .connect()
            .await
    }

    #[cfg(not(feature = "sqlite"))]
    async fn connect_sqlite(&self) -> Result<Box<dyn Connection>> {
        Err(anyhow::anyhow!("`sqlite` feature not enabled").into())
    }
}

#[arbor_core::async_trait]
impl Driver for Connect {
    fn capability(&self) -> &'static Capability {
        // `new` only accepts sqlite URLs
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        tracing::debug!(url = %self.url, "opening connection");
        self.connect_sqlite().await
    }
}
