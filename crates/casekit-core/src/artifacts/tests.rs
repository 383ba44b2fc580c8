//! Tests for the artifacts module.

use super::*;

mod descriptor_tests {
    use super::*;

    #[test]
    fn builder_pattern() {
        let descriptor = ArtifactDescriptor::new(
            "roms_marbl",
            "https://github.com/example/artifacts",
            "v1.2.0",
        )
        .unwrap()
        .with_source_mods(["src/bulk_flux.F90"])
        .with_namelists(["cfg/marbl_in"]);

        assert_eq!(descriptor.owner_name, "roms_marbl");
        assert_eq!(
            descriptor.source_location,
            "https://github.com/example/artifacts"
        );
        assert_eq!(descriptor.revision, "v1.2.0");
        assert_eq!(
            descriptor.source_mods,
            Some(vec!["src/bulk_flux.F90".to_string()])
        );
        assert_eq!(descriptor.namelists, Some(vec!["cfg/marbl_in".to_string()]));
    }

    #[test]
    fn owner_name_must_be_a_path_segment() {
        for bad in ["", ".", "..", "a/b", "a\\b"] {
            let result = ArtifactDescriptor::new(bad, "repo", "main");
            assert!(
                matches!(result, Err(StageError::InvalidOwnerName(_))),
                "owner {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn categories_skips_absent_lists() {
        let descriptor = ArtifactDescriptor::new("modelX", "repo", "main")
            .unwrap()
            .with_namelists(["cfg/run.nml"]);

        let present: Vec<_> = descriptor.categories().collect();
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].0, ArtifactCategory::Namelists);
        assert_eq!(present[0].1, ["cfg/run.nml".to_string()]);
    }

    #[test]
    fn categories_are_ordered_source_mods_first() {
        let descriptor = ArtifactDescriptor::new("modelX", "repo", "main")
            .unwrap()
            .with_namelists(["cfg/run.nml"])
            .with_source_mods(["src/patch.F90"]);

        let order: Vec<_> = descriptor
            .categories()
            .map(|(category, _)| category)
            .collect();
        assert_eq!(
            order,
            [ArtifactCategory::SourceMods, ArtifactCategory::Namelists]
        );
    }

    #[test]
    fn empty_list_is_distinct_from_absent() {
        let empty = ArtifactDescriptor::new("modelX", "repo", "main")
            .unwrap()
            .with_source_mods(Vec::<String>::new());

        assert_eq!(empty.source_mods, Some(vec![]));
        assert_eq!(empty.categories().count(), 1);

        let absent = ArtifactDescriptor::new("modelX", "repo", "main").unwrap();
        assert_eq!(absent.categories().count(), 0);
    }

    #[test]
    fn category_labels_are_stable() {
        assert_eq!(ArtifactCategory::SourceMods.label(), "source_mods");
        assert_eq!(ArtifactCategory::Namelists.label(), "namelists");
    }

    #[test]
    fn display_lists_declared_files() {
        let descriptor = ArtifactDescriptor::new("modelX", "https://example.com/repo", "main")
            .unwrap()
            .with_source_mods(["src/patch.F90"]);

        let rendered = descriptor.to_string();
        assert!(rendered.contains("modelX"));
        assert!(rendered.contains("checkout target: main"));
        assert!(rendered.contains("source_mods"));
        assert!(rendered.contains("src/patch.F90"));
        assert!(!rendered.contains("namelists"));
    }

    #[test]
    fn deserializes_from_blueprint_json() {
        let descriptor: ArtifactDescriptor = serde_json::from_str(
            r#"{
                "owner_name": "modelX",
                "source_location": "https://example.com/repo",
                "revision": "abc123",
                "source_mods": ["src/patch.F90"],
                "namelists": null
            }"#,
        )
        .unwrap();

        assert_eq!(descriptor.owner_name, "modelX");
        assert_eq!(descriptor.revision, "abc123");
        assert_eq!(
            descriptor.source_mods,
            Some(vec!["src/patch.F90".to_string()])
        );
        assert_eq!(descriptor.namelists, None);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn missing_artifact_names_the_declared_path() {
        let err = StageError::MissingArtifact {
            path: "cfg/run.nml".to_string(),
        };
        assert!(err.to_string().contains("cfg/run.nml"));
    }

    #[test]
    fn revision_errors_are_distinct_from_missing_files() {
        let revision = StageError::RevisionNotFound {
            revision: "v9.9.9".to_string(),
            reason: "pathspec did not match".to_string(),
        };
        assert!(revision.to_string().contains("v9.9.9"));
        assert!(!revision.to_string().contains("does not exist"));
    }
}
