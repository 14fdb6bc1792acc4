use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

use crate::table::Table;

/// An asset search query: plain text, or an IPv4 network in CIDR form.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Text(String),
    Network(Ipv4Net),
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.contains('/') {
            if let Ok(net) = raw.parse::<Ipv4Net>() {
                return Query::Network(net);
            }
        }
        Query::Text(raw.to_lowercase())
    }

    pub fn matches(&self, id: &str, ipv4: &str, hostname: &str) -> bool {
        match self {
            Query::Text(q) => [hostname, ipv4, id].iter().any(|f| f.to_lowercase().contains(q.as_str())),
            Query::Network(net) => ipv4.trim().parse::<Ipv4Addr>().map(|ip| net.contains(&ip)).unwrap_or(false),
        }
    }

    /// Row indexes of `table` whose hostname, ipv4 or id match.
    pub fn search_table(&self, table: &Table) -> Vec<usize> {
        (0..table.len())
            .filter(|&r| self.matches(table.cell(r, "id"), table.cell(r, "ipv4"), table.cell(r, "hostname")))
            .collect()
    }
}

/// Case-insensitive hostname equality; `host` also matches `host.domain`.
pub fn hostname_matches(candidate: &str, wanted: &str) -> bool {
    let candidate = candidate.trim();
    let wanted = wanted.trim();
    if wanted.is_empty() {
        return false;
    }
    candidate.eq_ignore_ascii_case(wanted)
        || candidate.split('.').next().is_some_and(|short| !wanted.contains('.') && short.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_query_is_case_insensitive_substring() {
        let q = Query::parse("WIN-Server");
        assert!(q.matches("id1", "10.0.0.1", "win-server-01"));
        assert!(!q.matches("id1", "10.0.0.1", "linux-01"));
        assert!(Query::parse("192.168.1").matches("", "192.168.1.44", ""));
        assert!(Query::parse("ab12").matches("0000-AB12", "", ""));
    }

    #[test]
    fn cidr_query_matches_network_members() {
        let q = Query::parse("10.0.0.0/24");
        assert!(matches!(q, Query::Network(_)));
        assert!(q.matches("", "10.0.0.200", ""));
        assert!(!q.matches("", "10.0.1.1", ""));
        assert!(!q.matches("", "", "10.0.0.0/24"));
    }

    #[test]
    fn hostname_match_accepts_short_name() {
        assert!(hostname_matches("WIN-2019", "win-2019"));
        assert!(hostname_matches("win-2019.corp.local", "win-2019"));
        assert!(!hostname_matches("win-2019.corp.local", "win-2019.other"));
        assert!(!hostname_matches("win-20190", "win-2019"));
        assert!(!hostname_matches("anything", ""));
    }

    #[test]
    fn search_table_returns_matching_rows() {
        let mut t = Table::new(vec!["id".into(), "ipv4".into(), "hostname".into()]);
        t.rows.push(vec!["a".into(), "10.0.0.1".into(), "web".into()]);
        t.rows.push(vec!["b".into(), "10.0.0.2".into(), "db".into()]);
        assert_eq!(Query::parse("db").search_table(&t), vec![1]);
        assert_eq!(Query::parse("10.0.0").search_table(&t), vec![0, 1]);
    }
}
