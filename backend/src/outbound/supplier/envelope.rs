//! SOAP 1.1 envelope construction and tolerant record extraction.
//!
//! The supplier publishes no schema and is inconsistent about field order
//! and presence, so extraction works on local element names only: every
//! element named like the record tag becomes one record, and each requested
//! field is read from the first descendant with that name. Absent fields are
//! empty strings, and an unparseable payload yields no records.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};

/// Namespace of the SOAP 1.1 envelope.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Status value the supplier reports for a successful call.
pub const CALL_SUCCESS: &str = "Success";

/// Credentials carried in the `SecureHeader` of every request.
#[derive(Clone, PartialEq, Eq)]
pub struct SupplierCredentials {
    /// Account login.
    pub login: String,
    /// Account password.
    pub password: String,
    /// Supplier-issued user identifier.
    pub user_id: String,
}

impl std::fmt::Debug for SupplierCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplierCredentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Escape the five XML special characters.
///
/// # Examples
/// ```
/// use glasstrade::outbound::supplier::escape_xml;
///
/// assert_eq!(escape_xml("A&B <C>"), "A&amp;B &lt;C&gt;");
/// ```
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn push_element(out: &mut String, indent: &str, name: &str, value: &str) {
    out.push_str(indent);
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape_xml(value));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

/// Build a request envelope for `operation`.
///
/// Each parameter becomes a child of the operation element, in the order
/// given, with its value XML-escaped. Element names are fixed by the
/// supplier operation and are written verbatim.
///
/// # Examples
/// ```
/// use glasstrade::outbound::supplier::{SupplierCredentials, build_envelope};
///
/// let credentials = SupplierCredentials {
///     login: "trade".to_owned(),
///     password: "secret".to_owned(),
///     user_id: "42".to_owned(),
/// };
/// let xml = build_envelope(
///     "getBranchAvailability",
///     &[("argicCode", "2448AGN".to_owned()), ("qty", "1".to_owned())],
///     "http://supplier.example/",
///     &credentials,
/// );
/// assert!(xml.contains("<argicCode>2448AGN</argicCode>"));
/// assert!(xml.contains("<UserID>42</UserID>"));
/// ```
pub fn build_envelope(
    operation: &str,
    params: &[(&str, String)],
    namespace: &str,
    credentials: &SupplierCredentials,
) -> String {
    let namespace = escape_xml(namespace);
    let mut xml = String::with_capacity(512);
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str(
        "<soap:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" ",
    );
    xml.push_str(&format!("xmlns:soap=\"{SOAP_ENVELOPE_NS}\">\n"));
    xml.push_str("  <soap:Header>\n");
    xml.push_str(&format!("    <SecureHeader xmlns=\"{namespace}\">\n"));
    push_element(&mut xml, "      ", "Login", &credentials.login);
    push_element(&mut xml, "      ", "Password", &credentials.password);
    push_element(&mut xml, "      ", "UserID", &credentials.user_id);
    xml.push_str("    </SecureHeader>\n");
    xml.push_str("  </soap:Header>\n");
    xml.push_str("  <soap:Body>\n");
    xml.push_str(&format!("    <{operation} xmlns=\"{namespace}\">\n"));
    for (name, value) in params {
        push_element(&mut xml, "      ", name, value);
    }
    xml.push_str(&format!("    </{operation}>\n"));
    xml.push_str("  </soap:Body>\n");
    xml.push_str("</soap:Envelope>\n");
    xml
}

/// One extracted record: requested field name to trimmed text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapRecord(BTreeMap<String, String>);

impl SoapRecord {
    /// Text of `field`, or `""` when the record lacks it.
    pub fn field(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    /// Text of `field` when present and non-blank.
    pub fn non_blank(&self, field: &str) -> Option<&str> {
        Some(self.field(field)).filter(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for SoapRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

fn first_named<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Records named `record_tag` in a parsed response.
pub fn records_in(doc: &Document<'_>, record_tag: &str, fields: &[&str]) -> Vec<SoapRecord> {
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == record_tag)
        .map(|record| {
            fields
                .iter()
                .map(|field| {
                    let value = first_named(record, field).map(text_of).unwrap_or_default();
                    (*field, value)
                })
                .collect::<SoapRecord>()
        })
        .collect()
}

/// Extract every `record_tag` record from `xml`.
///
/// Returns an empty list when `xml` cannot be parsed, so "no records" is
/// ambiguous between an empty result and a malformed payload.
///
/// # Examples
/// ```
/// use glasstrade::outbound::supplier::extract_records;
///
/// let xml = "<r><Depot><DepotCode>LDS</DepotCode></Depot><Depot/></r>";
/// let records = extract_records(xml, "Depot", &["DepotCode", "Town"]);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].field("DepotCode"), "LDS");
/// assert_eq!(records[0].field("Town"), "");
/// assert_eq!(records[1].field("DepotCode"), "");
/// ```
pub fn extract_records(xml: &str, record_tag: &str, fields: &[&str]) -> Vec<SoapRecord> {
    Document::parse(xml)
        .map(|doc| records_in(&doc, record_tag, fields))
        .unwrap_or_default()
}

/// Failure reported inside a parsed response, if any.
///
/// A SOAP `Fault` yields its `faultstring`; a `callResult` whose `Status`
/// is not [`CALL_SUCCESS`] yields the status, followed by its `Message`
/// when one is present. Responses without a `callResult` are not failures.
pub fn call_failure(doc: &Document<'_>) -> Option<String> {
    let root = doc.root();
    if let Some(fault) = root.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == "Fault"
            && n.tag_name().namespace() == Some(SOAP_ENVELOPE_NS)
    }) {
        let reason = first_named(fault, "faultstring")
            .map(text_of)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "SOAP fault".to_owned());
        return Some(reason);
    }

    let call_result = first_named(root, "callResult")?;
    let status = first_named(call_result, "Status").map(text_of)?;
    if status.eq_ignore_ascii_case(CALL_SUCCESS) {
        return None;
    }
    let message = first_named(call_result, "Message")
        .map(text_of)
        .filter(|s| !s.is_empty());
    Some(match message {
        Some(message) => format!("{status}: {message}"),
        None => status,
    })
}
