//! vim25 SOAP envelope codec and HTTP transport.
//!
//! Requests are serialised with quick-xml's serde serializer and wrapped in
//! a SOAP 1.1 envelope. Responses are streamed with `quick_xml::Reader`; only
//! the pieces this crate needs (returned references, service content, fault
//! text) are read.

use crate::error::{VmwareError, VmwareResult};
use crate::types::{AboutInfo, ManagedObjectReference, ServiceContent, VimRequest, VsphereConfig};

use async_trait::async_trait;
use log::{debug, error, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

// ─── Constants ───────────────────────────────────────────────────────

const NS_SOAPENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const NS_XSD: &str = "http://www.w3.org/2001/XMLSchema";
const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const NS_VIM25: &str = "urn:vim25";

const SESSION_COOKIE: &str = "vmware_soap_session";

// ─── Transport seam ──────────────────────────────────────────────────

/// Carries a fully built SOAP envelope to the SDK endpoint.
///
/// Implementations own session handling; callers get back the raw response
/// document or the transport's own error.
#[async_trait]
pub trait RoundTripper: Send + Sync {
    async fn round_trip(&self, method: &str, envelope: String) -> VmwareResult<String>;
}

/// reqwest-backed transport for an already-authenticated SOAP session.
#[derive(Debug)]
pub struct SoapHttpTransport {
    client: Client,
    endpoint: Url,
    soap_action: String,
    session_cookie: Option<String>,
}

impl SoapHttpTransport {
    /// Transport for the config's `https://{host}:{port}/sdk` endpoint.
    pub fn new(config: &VsphereConfig) -> VmwareResult<Self> {
        let endpoint = config.sdk_url()?;
        Self::with_endpoint(config, endpoint)
    }

    /// Transport for an explicit endpoint (reverse proxies, test servers).
    pub fn with_endpoint(config: &VsphereConfig, endpoint: Url) -> VmwareResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VmwareError::connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            soap_action: format!("{NS_VIM25}/{}", config.api_version),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RoundTripper for SoapHttpTransport {
    async fn round_trip(&self, method: &str, envelope: String) -> VmwareResult<String> {
        debug!("vim25 {} to {} ({} bytes)", method, self.endpoint, envelope.len());
        trace!("vim25 {} request body:\n{}", method, envelope);

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", self.soap_action.as_str())
            .body(envelope);

        if let Some(ref cookie) = self.session_cookie {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={cookie}"));
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        trace!("vim25 {} response: status={}, body length={}", method, status, body.len());

        // vSphere reports faults as HTTP 500 with a fault body
        if let Some(fault) = extract_fault(&body) {
            error!("vim25 {} fault (HTTP {}): {}", method, status.as_u16(), fault);
            return Err(VmwareError::fault(fault));
        }

        if !status.is_success() {
            return Err(VmwareError::api(
                status.as_u16(),
                format!("{method} failed with HTTP {status}"),
            ));
        }

        Ok(body)
    }
}

// ─── Encoding ────────────────────────────────────────────────────────

/// Wrap a request in a SOAP envelope.
pub fn encode_envelope<R: VimRequest>(request: &R) -> VmwareResult<String> {
    let body = quick_xml::se::to_string(request)
        .map_err(|e| VmwareError::parse(format!("Failed to encode {}: {e}", R::METHOD)))?;

    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="{NS_SOAPENV}" xmlns:xsd="{NS_XSD}" xmlns:xsi="{NS_XSI}">
  <soapenv:Body xmlns="{NS_VIM25}">{body}</soapenv:Body>
</soapenv:Envelope>"#
    ))
}

// ─── Decoding ────────────────────────────────────────────────────────

/// Read the managed object reference returned by a method, if any.
pub fn decode_returnval(xml: &str) -> VmwareResult<Option<ManagedObjectReference>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"returnval" => {
                let kind = type_attribute(&e)?.unwrap_or_default();
                let value = read_leaf_text(&mut reader)?;
                return Ok(Some(ManagedObjectReference::new(kind, value)));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Read the `RetrieveServiceContent` response.
pub fn decode_service_content(xml: &str) -> VmwareResult<ServiceContent> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut seen_returnval = false;
    let mut file_manager = None;
    let mut about = AboutInfo::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"returnval" => seen_returnval = true,
                b"fileManager" => {
                    let kind = type_attribute(&e)?.unwrap_or_else(|| "FileManager".to_string());
                    let value = read_leaf_text(&mut reader)?;
                    file_manager = Some(ManagedObjectReference::new(kind, value));
                }
                b"fullName" => about.full_name = read_leaf_text(&mut reader)?,
                b"apiVersion" => about.api_version = read_leaf_text(&mut reader)?,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_returnval {
        return Err(VmwareError::parse("RetrieveServiceContent response has no returnval"));
    }

    Ok(ServiceContent { file_manager, about })
}

/// Fault string of a SOAP fault document.
pub fn extract_fault(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"faultstring" => {
                return read_leaf_text(&mut reader).ok();
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn type_attribute(e: &BytesStart<'_>) -> VmwareResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| VmwareError::parse(format!("Malformed attribute: {err}")))?;
        if attr.key.as_ref() == b"type" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Text content up to the end of the current (leaf) element.
fn read_leaf_text(reader: &mut Reader<&[u8]>) -> VmwareResult<String> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => {
                let bytes = c.into_inner();
                let cdata = std::str::from_utf8(&bytes)
                    .map_err(|e| VmwareError::parse(format!("Invalid UTF-8 in CDATA: {e}")))?;
                text.push_str(cdata);
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(VmwareError::parse("Unexpected end of SOAP response")),
            _ => {}
        }
    }
}
