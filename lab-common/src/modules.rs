//! Catalog of vulnerability modules known to the lab

use serde::Serialize;

/// Label shown for identifiers that are not in the catalog
pub const UNKNOWN_VULNERABILITY: &str = "Unknown Vulnerability";

/// A vulnerability module: URL identifier plus display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VulnerabilityModule {
    pub id: &'static str,
    pub name: &'static str,
}

pub const MODULES: &[VulnerabilityModule] = &[
    VulnerabilityModule { id: "brute", name: "Brute Force" },
    VulnerabilityModule { id: "exec", name: "Command Injection" },
    VulnerabilityModule { id: "csrf", name: "CSRF" },
    VulnerabilityModule { id: "fi", name: "File Inclusion" },
    VulnerabilityModule { id: "upload", name: "File Upload" },
    VulnerabilityModule { id: "sqli", name: "SQL Injection" },
    VulnerabilityModule { id: "sqli_blind", name: "SQL Injection (Blind)" },
    VulnerabilityModule { id: "weak_id", name: "Weak Session IDs" },
    VulnerabilityModule { id: "xss_r", name: "Reflected XSS" },
    VulnerabilityModule { id: "xss_s", name: "Stored XSS" },
    VulnerabilityModule { id: "javascript", name: "JavaScript" },
    VulnerabilityModule { id: "authbypass", name: "Authorisation Bypass" },
    VulnerabilityModule { id: "open_redirect", name: "Open HTTP Redirect" },
];

/// Find a module by its exact identifier
pub fn lookup(id: &str) -> Option<&'static VulnerabilityModule> {
    MODULES.iter().find(|m| m.id == id)
}

pub fn is_known(id: &str) -> bool {
    lookup(id).is_some()
}

/// Display name for an identifier, `Unknown Vulnerability` when not cataloged
pub fn display_name(id: &str) -> &'static str {
    lookup(id).map(|m| m.name).unwrap_or(UNKNOWN_VULNERABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_module() {
        let module = lookup("exec").unwrap();
        assert_eq!(module.name, "Command Injection");
        assert_eq!(display_name("sqli_blind"), "SQL Injection (Blind)");
    }

    #[test]
    fn test_unknown_module_label() {
        assert_eq!(display_name("nope"), UNKNOWN_VULNERABILITY);
        assert_eq!(display_name("EXEC"), UNKNOWN_VULNERABILITY);
        assert!(!is_known("../exec"));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = MODULES.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), MODULES.len());
        assert_eq!(MODULES.len(), 13);
    }
}
