//! Remote image source over HTTP range requests

use reqwest::blocking::Client;
use reqwest::header::RANGE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{check_length, SectorSource};
use crate::error::{Iso9660Error, Result};
use crate::types::OpenOptions;
use crate::utils::{sector::sector_to_byte, ReadCursor};

/// Fetches each sector range with its own `Range: bytes=a-b` request
///
/// Only `206 Partial Content` is accepted. A server that answers with the
/// whole resource instead is reported as `RangeNotHonored`.
#[derive(Debug)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    /// Build a client for `url`
    pub fn new(url: &str, options: &OpenOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url: url.to_string(),
            client: builder.build()?,
        })
    }

    /// Location of the image
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Inclusive `Range` header value for `length` bytes at `start`
pub fn range_header(start: u64, length: usize) -> String {
    format!("bytes={}-{}", start, start + length as u64 - 1)
}

impl SectorSource for HttpSource {
    fn fetch(&mut self, sector: u32, length: usize) -> Result<ReadCursor> {
        if length == 0 {
            return Ok(ReadCursor::new(Vec::new()));
        }

        let start = sector_to_byte(sector);
        let range = range_header(start, length);
        debug!(sector, length, %range, url = %self.url, "http fetch");

        let response = self.client.get(&self.url).header(RANGE, range.as_str()).send()?;
        let status = response.status();
        if status != StatusCode::PARTIAL_CONTENT {
            if status.is_success() {
                return Err(Iso9660Error::RangeNotHonored { status: status.as_u16() });
            }
            response.error_for_status_ref()?;
            return Err(Iso9660Error::RangeNotHonored { status: status.as_u16() });
        }

        let mut data = response.bytes()?.to_vec();
        check_length(length, &data)?;
        if data.len() > length {
            warn!(requested = length, received = data.len(), "server sent more than the requested range");
            data.truncate(length);
        }

        Ok(ReadCursor::new(data))
    }
}
