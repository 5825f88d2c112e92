use super::error::FilterError;
use super::model::Filter;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Resource types managed by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Agent,
    Alert,
    Audit,
    CertBund,
    Cpe,
    Credential,
    Cve,
    DfnCert,
    Filter,
    Group,
    Host,
    Note,
    Nvt,
    OperatingSystem,
    Override,
    Permission,
    Policy,
    PortList,
    Report,
    ReportFormat,
    Result,
    Role,
    ScanConfig,
    Scanner,
    Schedule,
    SecInfo,
    Tag,
    Target,
    Task,
    Ticket,
    TlsCertificate,
    User,
    Vuln,
}

impl EntityType {
    pub const ALL: &'static [EntityType] = &[
        EntityType::Agent,
        EntityType::Alert,
        EntityType::Audit,
        EntityType::CertBund,
        EntityType::Cpe,
        EntityType::Credential,
        EntityType::Cve,
        EntityType::DfnCert,
        EntityType::Filter,
        EntityType::Group,
        EntityType::Host,
        EntityType::Note,
        EntityType::Nvt,
        EntityType::OperatingSystem,
        EntityType::Override,
        EntityType::Permission,
        EntityType::Policy,
        EntityType::PortList,
        EntityType::Report,
        EntityType::ReportFormat,
        EntityType::Result,
        EntityType::Role,
        EntityType::ScanConfig,
        EntityType::Scanner,
        EntityType::Schedule,
        EntityType::SecInfo,
        EntityType::Tag,
        EntityType::Target,
        EntityType::Task,
        EntityType::Ticket,
        EntityType::TlsCertificate,
        EntityType::User,
        EntityType::Vuln,
    ];

    /// The name used throughout the console
    pub fn canonical_name(&self) -> &'static str {
        match self {
            EntityType::Agent => "agent",
            EntityType::Alert => "alert",
            EntityType::Audit => "audit",
            EntityType::CertBund => "certbund",
            EntityType::Cpe => "cpe",
            EntityType::Credential => "credential",
            EntityType::Cve => "cve",
            EntityType::DfnCert => "dfncert",
            EntityType::Filter => "filter",
            EntityType::Group => "group",
            EntityType::Host => "host",
            EntityType::Note => "note",
            EntityType::Nvt => "nvt",
            EntityType::OperatingSystem => "operatingsystem",
            EntityType::Override => "override",
            EntityType::Permission => "permission",
            EntityType::Policy => "policy",
            EntityType::PortList => "portlist",
            EntityType::Report => "report",
            EntityType::ReportFormat => "reportformat",
            EntityType::Result => "result",
            EntityType::Role => "role",
            EntityType::ScanConfig => "scanconfig",
            EntityType::Scanner => "scanner",
            EntityType::Schedule => "schedule",
            EntityType::SecInfo => "secinfo",
            EntityType::Tag => "tag",
            EntityType::Target => "target",
            EntityType::Task => "task",
            EntityType::Ticket => "ticket",
            EntityType::TlsCertificate => "tlscertificate",
            EntityType::User => "user",
            EntityType::Vuln => "vuln",
        }
    }

    /// The value the server expects in `type=<value>`
    ///
    /// Audits and policies are stored as tasks and scan configs.
    pub fn type_value(&self) -> &'static str {
        match self {
            EntityType::Audit | EntityType::Task => "task",
            EntityType::Policy | EntityType::ScanConfig => "config",
            EntityType::OperatingSystem => "os",
            EntityType::PortList => "port_list",
            EntityType::ReportFormat => "report_format",
            EntityType::SecInfo => "info",
            EntityType::TlsCertificate => "tls_certificate",
            other => other.canonical_name(),
        }
    }
}

impl FromStr for EntityType {
    type Err = FilterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.to_lowercase().replace(['_', '-', ' '], "");
        match name.as_str() {
            "os" | "operatingsystem" => return Ok(EntityType::OperatingSystem),
            "config" | "scanconfig" => return Ok(EntityType::ScanConfig),
            "info" | "secinfo" => return Ok(EntityType::SecInfo),
            _ => {}
        }
        EntityType::ALL
            .iter()
            .copied()
            .find(|e| e.canonical_name() == name)
            .ok_or_else(|| FilterError::UnknownEntityType(s.to_string()))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// No restriction: all rows on one page
pub static ALL_FILTER: LazyLock<Filter> = LazyLock::new(|| Filter::from_string("first=1 rows=-1"));

/// Back to the first page
pub static RESET_FILTER: LazyLock<Filter> = LazyLock::new(|| Filter::from_string("first=1"));

/// Used when neither the user nor the server supplied a filter
pub static DEFAULT_FALLBACK_FILTER: LazyLock<Filter> =
    LazyLock::new(|| Filter::from_string("sort=name first=1 rows=10"));

static CANONICAL_FILTERS: LazyLock<HashMap<EntityType, Filter>> = LazyLock::new(|| {
    EntityType::ALL
        .iter()
        .map(|entity| {
            let filter = Filter::from_string(&format!("type={}", entity.type_value()))
                .with_filter_type(entity.canonical_name());
            (*entity, filter)
        })
        .collect()
});

/// Read-only `type=<entity>` template; `copy()` it before mutating
pub fn canonical_filter(entity: EntityType) -> &'static Filter {
    &CANONICAL_FILTERS[&entity]
}
