//! Primary port selection

/// Well-known web ports, scanned in order of preference
const PREFERRED_PORTS: &[&str] = &["80", "443", "8080", "8000", "9000", "3000"];

/// Choose the representative port among a container's published host ports
///
/// Scans the fixed preference list in order and returns the first preferred
/// port present; otherwise the first port in encounter order; `None` for an
/// empty set. Pure and deterministic.
pub fn select_primary_port(ports: &[String]) -> Option<&str> {
    for &pref in PREFERRED_PORTS {
        if ports.iter().any(|p| p.as_str() == pref) {
            return Some(pref);
        }
    }
    ports.first().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prefers_well_known_web_ports() {
        assert_eq!(
            select_primary_port(&ports(&["9090", "8080", "5432"])),
            Some("8080")
        );
        // Preference list order wins over encounter order
        assert_eq!(
            select_primary_port(&ports(&["3000", "443"])),
            Some("443")
        );
    }

    #[test]
    fn test_falls_back_to_first_in_encounter_order() {
        assert_eq!(select_primary_port(&ports(&["7878", "6767"])), Some("7878"));
    }

    #[test]
    fn test_empty_set_yields_none() {
        assert_eq!(select_primary_port(&[]), None);
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let input = ports(&["9117", "9000", "7878"]);
        assert_eq!(select_primary_port(&input), select_primary_port(&input));
    }
}
