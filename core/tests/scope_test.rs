/// Unit tests for the scope state machine
use tablero_core::records::SexRecord;
use tablero_core::{RegionClick, Scope};

fn dept(code: &str, name: &str) -> Scope {
    Scope::Department {
        code: code.to_string(),
        name: name.to_string(),
    }
}

mod region_clicks {
    use super::*;

    #[test]
    fn national_click_selects_department() {
        let outcome = Scope::National.after_region_click("Antioquia", "05");
        assert_eq!(
            outcome,
            RegionClick::Selected {
                code: "05".to_string(),
                name: "Antioquia".to_string(),
            }
        );
        assert_eq!(outcome.scope(), dept("05", "Antioquia"));
    }

    #[test]
    fn same_department_click_toggles_back_to_national() {
        let scope = dept("05", "Antioquia");
        let outcome = scope.after_region_click("Antioquia", "05");
        assert_eq!(outcome, RegionClick::Cleared);
        assert_eq!(outcome.scope(), Scope::National);
    }

    #[test]
    fn other_department_click_switches_selection() {
        let scope = dept("05", "Antioquia");
        let outcome = scope.after_region_click("Atlántico", "08");
        assert_eq!(outcome.scope(), dept("08", "Atlántico"));
    }

    #[test]
    fn department_click_resets_municipality_substate() {
        let scope = Scope::Municipality {
            dept_code: "05".to_string(),
            dept_name: "Antioquia".to_string(),
            muni_code: "05001".to_string(),
        };
        // Clicking another department lands on a plain department scope
        let next = scope.after_region_click("Atlántico", "08").scope();
        assert_eq!(next.muni_code(), None);
        assert_eq!(next.dept_code(), Some("08"));

        // Clicking the same department clears everything
        let outcome = scope.after_region_click("Antioquia", "05");
        assert_eq!(outcome, RegionClick::Cleared);
    }

    #[test]
    fn every_click_outcome_is_selected_or_cleared() {
        // The controller matches exhaustively on the outcome; a region
        // click can never land on a municipality scope
        for scope in [Scope::National, dept("05", "Antioquia")] {
            match scope.after_region_click("Atlántico", "08") {
                RegionClick::Selected { ref code, .. } => assert_eq!(code, "08"),
                RegionClick::Cleared => panic!("08 was not the active department"),
            }
        }
    }
}

mod municipality_clicks {
    use super::*;

    #[test]
    fn requires_a_selected_department() {
        assert!(Scope::National.after_municipality_click("05001").is_err());
    }

    #[test]
    fn selects_under_the_department() {
        let next = dept("05", "Antioquia")
            .after_municipality_click("05001")
            .unwrap();
        assert_eq!(next.dept_code(), Some("05"));
        assert_eq!(next.muni_code(), Some("05001"));
    }

    #[test]
    fn same_municipality_click_toggles_back_to_department() {
        let scope = dept("05", "Antioquia")
            .after_municipality_click("05001")
            .unwrap();
        let next = scope.after_municipality_click("05001").unwrap();
        assert_eq!(next, dept("05", "Antioquia"));
    }

    #[test]
    fn different_municipality_click_switches_selection() {
        let scope = dept("05", "Antioquia")
            .after_municipality_click("05001")
            .unwrap();
        let next = scope.after_municipality_click("05088").unwrap();
        assert_eq!(next.muni_code(), Some("05088"));
        assert_eq!(next.dept_code(), Some("05"));
    }
}

mod record_matching {
    use super::*;

    fn sex_record(code: Option<&str>) -> SexRecord {
        SexRecord {
            cod_departamento: code.map(String::from),
            departamento: "X".to_string(),
            sexo: Some("M".to_string()),
            total: 1,
        }
    }

    #[test]
    fn national_scope_matches_everything() {
        assert!(Scope::National.matches(&sex_record(Some("05"))));
        assert!(Scope::National.matches(&sex_record(None)));
    }

    #[test]
    fn department_scope_matches_by_code_only() {
        let scope = dept("05", "Antioquia");
        assert!(scope.matches(&sex_record(Some("05"))));
        assert!(!scope.matches(&sex_record(Some("08"))));
        // No code field means excluded under a department scope
        assert!(!scope.matches(&sex_record(None)));
    }

    #[test]
    fn municipality_scope_filters_by_its_department() {
        let scope = dept("05", "Antioquia")
            .after_municipality_click("05001")
            .unwrap();
        assert!(scope.matches(&sex_record(Some("05"))));
        assert!(!scope.matches(&sex_record(Some("08"))));
    }
}
