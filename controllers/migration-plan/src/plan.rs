//! Plan resolution.
//!
//! Turns a raw `MigrationPlanSpec` into the fully defaulted settings a pass
//! works from. Pure; performs no I/O.

use crds::{MigrationPlanSpec, TargetCloud};

/// Source kinds the controller knows how to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    DeploymentConfigs,
    Routes,
    Services,
    PersistentVolumeClaims,
}

impl SourceKind {
    /// Kinds scanned when a plan's `include` is empty
    pub const DEFAULT_SET: [SourceKind; 4] = [
        SourceKind::DeploymentConfigs,
        SourceKind::Routes,
        SourceKind::Services,
        SourceKind::PersistentVolumeClaims,
    ];

    /// Parses a user supplied kind name. Case-insensitive; accepts singular,
    /// plural and short names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "deploymentconfigs" | "deploymentconfig" | "dc" | "dcs" => Some(SourceKind::DeploymentConfigs),
            "routes" | "route" => Some(SourceKind::Routes),
            "services" | "service" | "svc" => Some(SourceKind::Services),
            "persistentvolumeclaims" | "persistentvolumeclaim" | "pvc" | "pvcs" => {
                Some(SourceKind::PersistentVolumeClaims)
            }
            _ => None,
        }
    }

    /// Key used in `status.found`
    pub fn key(self) -> &'static str {
        match self {
            SourceKind::DeploymentConfigs => "deploymentconfigs",
            SourceKind::Routes => "routes",
            SourceKind::Services => "services",
            SourceKind::PersistentVolumeClaims => "persistentvolumeclaims",
        }
    }

    /// Name used in human-readable notes
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::DeploymentConfigs => "DeploymentConfigs",
            SourceKind::Routes => "Routes",
            SourceKind::Services => "Services",
            SourceKind::PersistentVolumeClaims => "PVCs",
        }
    }
}

/// Fully defaulted view of a plan for one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlan {
    /// Plan name
    pub name: String,
    /// Plan namespace; also where the output ConfigMap lives
    pub namespace: String,
    /// Namespaces to scan, in spec order, deduplicated
    pub namespaces: Vec<String>,
    /// Kinds to convert, in spec order, deduplicated
    pub kinds: Vec<SourceKind>,
    pub target_cloud: TargetCloud,
    /// Ingress class hint; `None` when the plan leaves it empty
    pub ingress_class: Option<String>,
    /// Resolved output ConfigMap name
    pub output_name: String,
}

impl ResolvedPlan {
    /// (namespace, kind) pairs in merge order: namespaces first, then kinds
    pub fn scan_pairs(&self) -> Vec<(&str, SourceKind)> {
        self.namespaces
            .iter()
            .flat_map(|ns| self.kinds.iter().map(move |kind| (ns.as_str(), *kind)))
            .collect()
    }
}

/// Resolves a plan spec.
///
/// Unknown kind names are dropped without a note. The default kind set only
/// applies when `include` is empty.
pub fn resolve(name: &str, namespace: &str, spec: &MigrationPlanSpec) -> ResolvedPlan {
    let mut namespaces: Vec<String> = Vec::new();
    for ns in spec.namespaces.iter().map(|ns| ns.trim()).filter(|ns| !ns.is_empty()) {
        if !namespaces.iter().any(|seen| seen == ns) {
            namespaces.push(ns.to_string());
        }
    }
    if namespaces.is_empty() {
        namespaces.push(namespace.to_string());
    }

    let kinds = if spec.include.is_empty() {
        SourceKind::DEFAULT_SET.to_vec()
    } else {
        let mut kinds = Vec::new();
        for kind in spec.include.iter().filter_map(|k| SourceKind::parse(k)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    };

    let ingress_class = spec
        .ingress_class
        .as_deref()
        .map(str::trim)
        .filter(|class| !class.is_empty())
        .map(str::to_string);

    let output_name = spec
        .output_config_map
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(|| format!("{name}-output"), str::to_string);

    ResolvedPlan {
        name: name.to_string(),
        namespace: namespace.to_string(),
        namespaces,
        kinds,
        target_cloud: spec.target_cloud,
        ingress_class,
        output_name,
    }
}
