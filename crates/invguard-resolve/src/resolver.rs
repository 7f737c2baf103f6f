//! Depth-first group walk and the right-biased host fold.

use invguard_types::{EffectiveHostVars, Mapping, Value, VarsMap};

use crate::error::{ResolveError, ResolveResult};

/// Name of the implicit top-level group.
const ALL_GROUP: &str = "all";

/// One appearance of a host under a group, with the vars it resolves to there.
#[derive(Clone, Debug, PartialEq)]
pub struct HostOccurrence {
    /// Host name as written under `hosts`.
    pub host: String,
    /// Slash-separated path of the group that lists the host (e.g. `all/web`).
    pub group: String,
    /// Inherited group vars overridden by the host's own vars.
    pub vars: VarsMap,
}

/// Resolve the effective variables of every host in an inventory tree.
///
/// The walk starts at the root's `all` entry when present, otherwise at the
/// root itself. An empty document (`Null`) or an empty `all` resolves to no
/// hosts. A root or `all` entry of any other non-mapping shape is rejected.
pub fn resolve(tree: &Value) -> ResolveResult<EffectiveHostVars> {
    let root = match tree {
        Value::Null => return Ok(EffectiveHostVars::new()),
        Value::Mapping(m) => m,
        other => {
            return Err(ResolveError::NotAMapping {
                path: "<root>".into(),
                found: other.kind(),
            })
        }
    };

    let top = match root.get(ALL_GROUP) {
        None => root,
        Some(Value::Mapping(m)) => m,
        Some(Value::Null) => return Ok(EffectiveHostVars::new()),
        Some(other) => {
            return Err(ResolveError::NotAMapping {
                path: ALL_GROUP.into(),
                found: other.kind(),
            })
        }
    };

    let occurrences = collect_occurrences(top);
    let hosts = fold_occurrences(occurrences);
    tracing::debug!(hosts = hosts.len(), "inventory resolved");
    Ok(hosts)
}

/// Walk the group hierarchy depth-first, pre-order, and list every host
/// occurrence in visitation order.
///
/// Sibling groups and hosts are visited in input order. Non-mapping `vars`,
/// `hosts`, and `children` entries are treated as absent; non-mapping child
/// groups are skipped.
pub fn collect_occurrences(top: &Mapping) -> Vec<HostOccurrence> {
    let mut out = Vec::new();
    walk(top, ALL_GROUP, &VarsMap::new(), &mut out);
    out
}

/// Fold host occurrences into one mapping per host.
///
/// Each occurrence is merged onto whatever earlier occurrences of the same
/// host produced: keys present in both take the later value, keys unique to
/// either survive.
pub fn fold_occurrences(
    occurrences: impl IntoIterator<Item = HostOccurrence>,
) -> EffectiveHostVars {
    occurrences
        .into_iter()
        .fold(EffectiveHostVars::new(), |mut hosts, occ| {
            match hosts.get_mut(&occ.host) {
                Some(prev) => {
                    tracing::debug!(host = %occ.host, group = %occ.group, "host listed again; merging onto earlier occurrence");
                    prev.extend(occ.vars);
                }
                None => {
                    hosts.insert(occ.host, occ.vars);
                }
            }
            hosts
        })
}

fn walk(group: &Mapping, path: &str, inherited: &VarsMap, out: &mut Vec<HostOccurrence>) {
    let mut merged = inherited.clone();
    if let Some(vars) = mapping_entry(group, "vars", path) {
        overlay(&mut merged, vars);
    }

    if let Some(hosts) = mapping_entry(group, "hosts", path) {
        for (host, host_vars) in hosts.iter() {
            let mut vars = merged.clone();
            if let Value::Mapping(hv) = host_vars {
                overlay(&mut vars, hv);
            }
            out.push(HostOccurrence {
                host: host.to_string(),
                group: path.to_string(),
                vars,
            });
        }
    }

    if let Some(children) = mapping_entry(group, "children", path) {
        for (name, child) in children.iter() {
            let child_path = format!("{path}/{name}");
            match child {
                Value::Mapping(child) => walk(child, &child_path, &merged, out),
                Value::Null => {}
                other => {
                    tracing::warn!(group = %child_path, found = other.kind(), "skipping non-mapping child group");
                }
            }
        }
    }
}

/// Fetch a mapping-valued key of a group, treating any other shape as absent.
fn mapping_entry<'a>(group: &'a Mapping, key: &str, path: &str) -> Option<&'a Mapping> {
    match group.get(key)? {
        Value::Mapping(m) => Some(m),
        Value::Null => None,
        other => {
            tracing::warn!(group = %path, key, found = other.kind(), "ignoring non-mapping entry");
            None
        }
    }
}

fn overlay(base: &mut VarsMap, vars: &Mapping) {
    for (k, v) in vars.iter() {
        base.insert(k.to_string(), v.clone());
    }
}
