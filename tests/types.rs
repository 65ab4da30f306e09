// ABOUTME: Integration tests for type-safe identifiers and validated types.
// ABOUTME: Tests parsing, validation, and type safety properties.

use elastic_package::types::*;

mod image_ref_tests {
    use super::*;

    #[test]
    fn parse_stack_image() {
        let img = ImageRef::parse("docker.elastic.co/elasticsearch/elasticsearch:7.14.0-SNAPSHOT")
            .unwrap();
        assert_eq!(img.registry(), Some("docker.elastic.co"));
        assert_eq!(img.repository(), "elasticsearch/elasticsearch");
        assert_eq!(img.tag(), Some("7.14.0-SNAPSHOT"));
        assert!(img.digest().is_none());
    }

    #[test]
    fn registry_port_is_not_a_tag() {
        let img = ImageRef::parse("localhost:5000/kibana").unwrap();
        assert_eq!(img.registry(), Some("localhost:5000"));
        assert_eq!(img.repository(), "kibana");
        assert!(img.tag().is_none());
    }

    #[test]
    fn parse_with_digest() {
        let img = ImageRef::parse("kibana@sha256:abc123").unwrap();
        assert_eq!(img.digest(), Some("sha256:abc123"));
        assert_eq!(img.to_string(), "kibana@sha256:abc123");
    }

    #[test]
    fn reject_invalid() {
        assert!(ImageRef::parse("").is_err());
        assert!(ImageRef::parse("kibana:").is_err());
        assert!(ImageRef::parse("kibana 7").is_err());
    }
}

mod stack_name_tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(StackName::new("elastic-package-stack").is_ok());
        assert!(StackName::new("stack_1").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(matches!(StackName::new(""), Err(StackNameError::Empty)));
        assert!(matches!(
            StackName::new("-stack"),
            Err(StackNameError::InvalidStart)
        ));
        assert!(matches!(
            StackName::new("Stack"),
            Err(StackNameError::NotLowercase)
        ));
        assert!(matches!(
            StackName::new("my.stack"),
            Err(StackNameError::InvalidChar('.'))
        ));
        assert!(matches!(
            StackName::new(&"a".repeat(64)),
            Err(StackNameError::TooLong)
        ));
    }
}

mod subnet_tests {
    use super::*;

    #[test]
    fn parses_both_families() {
        assert_eq!(Subnet::parse("10.0.0.0/8").unwrap().prefix_len(), 8);
        assert_eq!(Subnet::parse("fd00::/64").unwrap().prefix_len(), 64);
    }

    #[test]
    fn rejects_out_of_range_prefix() {
        assert!(Subnet::parse("10.0.0.0/33").is_err());
        assert!(Subnet::parse("fd00::/129").is_err());
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(
            Subnet::parse("10.0.0.0"),
            Err(SubnetError::MissingPrefix(_))
        ));
    }
}

mod interface_name_tests {
    use super::*;

    #[test]
    fn syntax_checks() {
        assert!(InterfaceName::new("eth0").is_ok());
        assert!(matches!(InterfaceName::new(""), Err(InterfaceNameError::Empty)));
        assert!(matches!(
            InterfaceName::new("averyveryverylongname"),
            Err(InterfaceNameError::TooLong(_))
        ));
        assert!(matches!(
            InterfaceName::new("eth0/1"),
            Err(InterfaceNameError::InvalidChar('/'))
        ));
    }

    #[test]
    fn lookup_of_missing_interface_fails() {
        assert!(matches!(
            InterfaceName::lookup("nonexistent0"),
            Err(InterfaceNameError::NotFound { .. })
        ));
    }
}

mod id_tests {
    use super::*;

    #[test]
    fn short_form_truncates() {
        let id = ContainerId::new("4b1c9f0e2d3a5b6c7d8e9f00");
        assert_eq!(id.short(), "4b1c9f0e2d3a");
        assert_eq!(NetworkId::new("net").short(), "net");
    }
}
