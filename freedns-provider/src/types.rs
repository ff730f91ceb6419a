use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// DNS record type identifier, as the console's save form and listing
/// table spell it.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"TXT"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
}

impl RecordType {
    /// The uppercase form used in the save form's `type` field and in the
    /// listing table's type column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record to be submitted through the console's save form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Record type.
    pub record_type: RecordType,
    /// Subdomain label relative to the selected domain. Empty for the apex.
    pub subdomain: String,
    /// Record value (address, target, or quoted text).
    pub address: String,
    /// Whether to also cover `*.subdomain`.
    pub wildcard: bool,
    /// TTL hint in seconds. Accepted for API parity; the console's save
    /// form carries no TTL field, so the remote never sees it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// A record located on the listing page (or through the deep search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatch {
    /// The console's internal record identifier (`data_id`).
    pub id: String,
    /// Record type of the matched row.
    pub record_type: RecordType,
    /// Subdomain label shown in the row's edit anchor.
    pub subdomain: String,
    /// The value as the listing displayed it. May be a truncated prefix
    /// ending in `...`, which indicates but does not prove equality with
    /// the queried value.
    pub value: String,
}

impl RecordMatch {
    /// Whether the listing displayed only a truncated prefix of the value.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.value.ends_with("...")
    }
}

/// Success kinds of a record submission.
///
/// `AlreadyExists` is a success, not an error: the target DNS state is
/// already satisfied, which keeps repeated create calls idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveOutcome {
    /// The console accepted the record and redirected to the listing.
    Created,
    /// The console reported a duplicate of an existing record.
    AlreadyExists,
}

// ============ Session ============

/// Username/password pair for the console login form. Transient; only used
/// to obtain a session cookie.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Console account name.
    pub username: String,
    /// Console account password.
    pub password: String,
}

// 日志里不允许出现密码
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A session cookie captured verbatim from a `Set-Cookie` response header.
///
/// The console attaches flags (`path`, `expires`, ...) that are kept as
/// opaque attributes; only the name/value pair is ever sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Remaining `;`-separated segments of the header, verbatim.
    pub attributes: Vec<String>,
}

impl SessionCookie {
    /// Parse a raw `Set-Cookie` header value. Returns `None` when the header
    /// carries no `name=value` pair.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let mut segments = header.split(';');
        let (name, value) = segments.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            attributes: segments
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// The `name=value` pair for a `Cookie` request header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

// ============ Zone Names ============

/// Reduce a fully-qualified zone to its registrable two-label suffix.
///
/// `a.b.example.com` becomes `example.com`; a trailing dot is stripped
/// before processing. Inputs with fewer than two labels are returned
/// unchanged.
#[must_use]
pub fn registrable_domain(zone: &str) -> String {
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    let labels: Vec<&str> = zone.split('.').collect();
    if labels.len() < 2 {
        return zone.to_string();
    }
    labels[labels.len() - 2..].join(".")
}
