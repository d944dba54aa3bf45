//! Client IP → country/city, best effort.
//!
//! `IpApiResolver` talks to an ip-api.com compatible endpoint. Resolution is total:
//! local or unparseable addresses never leave the process, and every failure on the
//! way out is logged and replaced by `GeoInfo::default()`.

use crate::error::AppError;
use common::model::geo::GeoInfo;
use common::model::identity::UNKNOWN;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use log::{debug, warn};
use serde::Deserialize;
use std::net::IpAddr;

const FIELDS: &str = "status,message,country,city";

pub trait GeoResolver: Send + Sync {
    fn resolve<'a>(&'a self, ip: &'a str) -> BoxFuture<'a, GeoInfo>;
}

#[derive(Deserialize, Debug)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

pub struct IpApiResolver {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiResolver {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn lookup(&self, ip: IpAddr) -> Result<GeoInfo, AppError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), ip);
        let response = self
            .client
            .get(&url)
            .query(&[("fields", FIELDS)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        interpret(response.json().await?)
    }
}

impl GeoResolver for IpApiResolver {
    fn resolve<'a>(&'a self, ip: &'a str) -> BoxFuture<'a, GeoInfo> {
        async move {
            let Some(addr) = public_address(ip) else {
                debug!("Skipping geo lookup for local or unparseable address '{ip}'");
                return GeoInfo::default();
            };

            match self.lookup(addr).await {
                Ok(geo) => geo,
                Err(e) => {
                    warn!("Geo lookup for {addr} failed: {e}");
                    GeoInfo::default()
                }
            }
        }
        .boxed()
    }
}

fn interpret(body: IpApiResponse) -> Result<GeoInfo, AppError> {
    if body.status != "success" {
        return Err(AppError::Payload(format!(
            "geo service answered '{}': {}",
            body.status,
            body.message.unwrap_or_default()
        )));
    }

    let or_unknown = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    Ok(GeoInfo {
        country: or_unknown(body.country),
        city: or_unknown(body.city),
    })
}

/// The address worth sending to the geo service, if any.
///
/// Loopback, unspecified, private, link-local and unique-local addresses (IPv4-mapped
/// forms included) are local and yield `None`, as does anything that does not parse.
pub fn public_address(ip: &str) -> Option<IpAddr> {
    let trimmed = ip.trim().trim_start_matches('[').trim_end_matches(']');
    let addr: IpAddr = trimmed.parse().ok()?;

    let local = match addr {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_unspecified()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => return public_address(&v4.to_string()),
            None => {
                let first = v6.segments()[0];
                v6.is_loopback()
                    || v6.is_unspecified()
                    || (first & 0xfe00) == 0xfc00
                    || (first & 0xffc0) == 0xfe80
            }
        },
    };

    if local {
        None
    } else {
        Some(addr)
    }
}
