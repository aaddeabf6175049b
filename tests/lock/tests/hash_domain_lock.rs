//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. The domain set has the expected count (catches forgotten additions)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated
//! 4. All domains follow the `LODESTAR::*::V1\0` naming convention
//! 5. No raw `LODESTAR::` domain literals in source outside `proof/hash.rs`

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use lock_tests::fixtures::workspace_root;
use lodestar_kernel::proof::hash::ALL_DOMAINS;

#[test]
fn domain_set_count() {
    assert_eq!(
        ALL_DOMAINS.len(),
        3,
        "if you added a new domain, update this count"
    );
}

#[test]
fn domains_are_unique() {
    let mut seen = BTreeSet::new();
    for domain in ALL_DOMAINS {
        assert!(
            seen.insert(domain),
            "duplicate domain: {}",
            String::from_utf8_lossy(domain)
        );
    }
}

#[test]
fn domains_are_null_terminated() {
    for domain in ALL_DOMAINS {
        assert_eq!(domain.last(), Some(&0));
        assert_eq!(
            domain.iter().filter(|b| **b == 0).count(),
            1,
            "interior null in {}",
            String::from_utf8_lossy(domain)
        );
    }
}

#[test]
fn domains_follow_naming_convention() {
    for domain in ALL_DOMAINS {
        let text = std::str::from_utf8(&domain[..domain.len() - 1]).unwrap();
        let parts: Vec<&str> = text.split("::").collect();
        assert_eq!(parts.len(), 3, "{text}");
        assert_eq!(parts[0], "LODESTAR");
        assert!(
            parts[1].chars().all(|c| c.is_ascii_uppercase() || c == '_'),
            "{text}"
        );
        assert_eq!(parts[2], "V1");
    }
}

fn collect_raw_literals(dir: &Path, hits: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_raw_literals(&path, hits);
        } else if path.extension().is_some_and(|e| e == "rs") && !path.ends_with("proof/hash.rs") {
            let Ok(content) = fs::read_to_string(&path) else {
                continue;
            };
            for (n, line) in content.lines().enumerate() {
                if line.contains("b\"LODESTAR::") {
                    hits.push(format!("{}:{}", path.display(), n + 1));
                }
            }
        }
    }
}

#[test]
fn no_raw_domain_literals_outside_hash_module() {
    let mut hits = Vec::new();
    for krate in ["kernel", "search", "harness"] {
        collect_raw_literals(&workspace_root().join(krate).join("src"), &mut hits);
    }
    assert!(hits.is_empty(), "raw domain literals found:\n{}", hits.join("\n"));
}
