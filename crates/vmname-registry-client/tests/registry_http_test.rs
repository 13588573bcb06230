//! HTTP behaviour of the registry client against a mocked registry
//!
//! Each test starts a wiremock server standing in for the registry endpoint.

use std::sync::Arc;
use vmname_registry_client::{
    ClientOptions, CreateVmNameRequest, RegistryClient, RegistryClientTrait, RegistryError,
    UpdateVmNameRequest, ERROR_STATUS,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/api/vmname";

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::new(format!("{}{}", server.uri(), ENDPOINT)).expect("client should build")
}

async fn mount_details(server: &MockServer, vm_name: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("rowkey", vm_name))
        .and(query_param("details", "true"))
        .respond_with(response)
        .with_priority(1)
        .mount(server)
        .await;
}

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_with_details() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            "lcpdevuks-0001",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Status":"Reserved","BusinessUnit":"finance","RowKey":"lcpdevuks-0001"}"#),
        )
        .await;

        let record = client_for(&server)
            .get_vm_name("lcpdevuks-0001", None, true)
            .await
            .expect("lookup should succeed");

        assert_eq!(record.vm_name, "lcpdevuks-0001");
        assert_eq!(record.location, "uks");
        assert_eq!(record.details.status.as_deref(), Some("Reserved"));
        assert_eq!(record.details.business_unit.as_deref(), Some("finance"));
    }

    #[tokio::test]
    async fn test_lookup_sends_environment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("environment", "prd"))
            .and(query_param("rowkey", "lcpprduks-0002"))
            .respond_with(ResponseTemplate::new(200).set_body_string("lcpprduks-0002"))
            .expect(1)
            .mount(&server)
            .await;

        let record = client_for(&server)
            .get_vm_name("lcpprduks-0002", Some("prd"), false)
            .await
            .expect("lookup should succeed");

        assert_eq!(record.vm_name, "lcpprduks-0002");
        assert!(record.details.status.is_none());
    }

    #[tokio::test]
    async fn test_lookup_lenient_details() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            "lcpdevuks-0003",
            ResponseTemplate::new(200).set_body_string(r#"{"Status":42}"#),
        )
        .await;

        let record = client_for(&server)
            .get_vm_name("lcpdevuks-0003", None, true)
            .await
            .expect("wrong-typed fields must not fail the lookup");

        assert!(record.details.status.is_none());
        assert!(record.details.business_unit.is_none());
    }

    #[tokio::test]
    async fn test_lookup_404_is_not_found() {
        let server = MockServer::start().await;
        mount_details(&server, "lcpdevuks-0404", ResponseTemplate::new(404).set_body_string("missing")).await;

        let err = client_for(&server)
            .get_vm_name("lcpdevuks-0404", None, true)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_lookup_500_carries_body() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            "lcpdevuks-0500",
            ResponseTemplate::new(500).set_body_string("table storage unavailable"),
        )
        .await;

        let err = client_for(&server)
            .get_vm_name("lcpdevuks-0500", None, true)
            .await
            .unwrap_err();

        match err {
            RegistryError::Api(body) => assert_eq!(body, "table storage unavailable"),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = RegistryClient::new("http://127.0.0.1:1/api/vmname".to_string()).unwrap();

        let err = client.get_vm_name("lcpdevuks-0001", None, true).await.unwrap_err();

        assert!(matches!(err, RegistryError::Http(_)));
    }
}

mod listing_tests {
    use super::*;

    async fn mount_listing(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("environment", "dev"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .with_priority(5)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let server = MockServer::start().await;
        mount_listing(&server, "  \n").await;

        let listing = client_for(&server).list_vm_names("dev", None).await.unwrap();

        assert!(listing.vm_names.is_empty());
        assert!(listing.statuses.is_empty());
        assert_eq!(listing.id(), "dev-0");
    }

    #[tokio::test]
    async fn test_listing_isolates_failed_lookup() {
        let server = MockServer::start().await;
        mount_listing(&server, "lcpdevuks-0001, lcpdevuks-0002,lcpdevuks-0003").await;
        mount_details(
            &server,
            "lcpdevuks-0001",
            ResponseTemplate::new(200).set_body_string(r#"{"Status":"Deployed"}"#),
        )
        .await;
        mount_details(&server, "lcpdevuks-0002", ResponseTemplate::new(500).set_body_string("boom")).await;
        mount_details(
            &server,
            "lcpdevuks-0003",
            ResponseTemplate::new(200).set_body_string(r#"{"Status":"Reserved"}"#),
        )
        .await;

        let listing = client_for(&server).list_vm_names("dev", None).await.unwrap();

        assert_eq!(listing.vm_names, vec!["lcpdevuks-0001", "lcpdevuks-0002", "lcpdevuks-0003"]);
        assert_eq!(listing.statuses["lcpdevuks-0001"], "Deployed");
        assert_eq!(listing.statuses["lcpdevuks-0002"], ERROR_STATUS);
        assert_eq!(listing.statuses["lcpdevuks-0003"], "Reserved");
        assert_eq!(listing.id(), "dev-3");
    }

    #[tokio::test]
    async fn test_listing_skips_missing_status() {
        let server = MockServer::start().await;
        mount_listing(&server, "lcpdevuks-0001").await;
        mount_details(
            &server,
            "lcpdevuks-0001",
            ResponseTemplate::new(200).set_body_string(r#"{"BusinessUnit":"finance"}"#),
        )
        .await;

        let listing = client_for(&server).list_vm_names("dev", None).await.unwrap();

        assert_eq!(listing.vm_names, vec!["lcpdevuks-0001"]);
        assert!(listing.statuses.is_empty());
    }

    #[tokio::test]
    async fn test_listing_with_location_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("environment", "dev"))
            .and(query_param("location", "uksouth"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .expect(1)
            .mount(&server)
            .await;

        let listing = client_for(&server)
            .list_vm_names("dev", Some("uksouth"))
            .await
            .unwrap();

        assert!(listing.vm_names.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_listing_keeps_order() {
        let server = MockServer::start().await;
        let names: Vec<String> = (1..=8).map(|i| format!("lcpdevuks-{i:04}")).collect();
        mount_listing(&server, &names.join(",")).await;
        for (i, name) in names.iter().enumerate() {
            mount_details(
                &server,
                name,
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"Status":"S{i}"}}"#))
                    .set_delay(std::time::Duration::from_millis(((8 - i) * 10) as u64)),
            )
            .await;
        }

        let client = RegistryClient::with_options(
            format!("{}{}", server.uri(), ENDPOINT),
            ClientOptions {
                request_timeout: None,
                lookup_concurrency: 4,
            },
        )
        .unwrap();
        let listing = client.list_vm_names("dev", None).await.unwrap();

        assert_eq!(listing.vm_names, names);
        for (i, name) in names.iter().enumerate() {
            assert_eq!(listing.statuses[name], format!("S{i}"));
        }
    }

    #[tokio::test]
    async fn test_listing_through_trait_object_on_spawned_task() {
        let server = MockServer::start().await;
        mount_listing(&server, "lcpdevuks-0001,lcpdevuks-0002").await;
        mount_details(
            &server,
            "lcpdevuks-0001",
            ResponseTemplate::new(200).set_body_string(r#"{"Status":"Reserved"}"#),
        )
        .await;
        mount_details(&server, "lcpdevuks-0002", ResponseTemplate::new(502).set_body_string("bad gateway")).await;

        let client: Arc<dyn RegistryClientTrait> = Arc::new(
            RegistryClient::with_options(
                format!("{}{}", server.uri(), ENDPOINT),
                ClientOptions {
                    request_timeout: None,
                    lookup_concurrency: 2,
                },
            )
            .unwrap(),
        );

        // Spawning requires the listing future to be Send
        let listing = tokio::spawn(async move { client.list_vm_names("dev", None).await })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(listing.vm_names, vec!["lcpdevuks-0001", "lcpdevuks-0002"]);
        assert_eq!(listing.statuses["lcpdevuks-0001"], "Reserved");
        assert_eq!(listing.statuses["lcpdevuks-0002"], ERROR_STATUS);
    }

    #[tokio::test]
    async fn test_listing_failure_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_vm_names("dev", None).await.unwrap_err();

        assert!(matches!(err, RegistryError::Api(body) if body == "maintenance"));
    }
}

mod write_tests {
    use super::*;

    fn create_request(status: Option<&str>) -> CreateVmNameRequest {
        CreateVmNameRequest {
            environment: "dev".to_string(),
            location: "uksouth".to_string(),
            status: status.map(str::to_string),
            business_unit: "R&D".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_takes_name_before_comma() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(query_param("environment", "dev"))
            .and(query_param("location", "uksouth"))
            .and(query_param("status", "Deployed"))
            .and(query_param("businessunit", "R&D"))
            .respond_with(ResponseTemplate::new(200).set_body_string("lcpdevuks-0007,Deployed"))
            .expect(1)
            .mount(&server)
            .await;

        let vm_name = client_for(&server)
            .create_vm_name(&create_request(None))
            .await
            .unwrap();

        assert_eq!(vm_name, "lcpdevuks-0007");
    }

    #[tokio::test]
    async fn test_create_with_explicit_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(query_param("status", "Reserved"))
            .respond_with(ResponseTemplate::new(200).set_body_string("lcpdevuks-0008"))
            .expect(1)
            .mount(&server)
            .await;

        let vm_name = client_for(&server)
            .create_vm_name(&create_request(Some("Reserved")))
            .await
            .unwrap();

        assert_eq!(vm_name, "lcpdevuks-0008");
    }

    #[tokio::test]
    async fn test_create_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(400).set_body_string("unknown environment"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_vm_name(&create_request(None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error: unknown environment");
    }

    #[tokio::test]
    async fn test_update() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(ENDPOINT))
            .and(query_param("environment", "dev"))
            .and(query_param("rowkey", "lcpdevuks-0001"))
            .and(query_param("status", "Available"))
            .and(query_param("businessunit", "finance"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .update_vm_name(&UpdateVmNameRequest {
                environment: "dev".to_string(),
                vm_name: "lcpdevuks-0001".to_string(),
                status: "Available".to_string(),
                business_unit: "finance".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_404_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such row"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .update_vm_name(&UpdateVmNameRequest {
                environment: "dev".to_string(),
                vm_name: "lcpdevuks-0001".to_string(),
                status: "Available".to_string(),
                business_unit: "finance".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Api(body) if body == "no such row"));
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(ENDPOINT))
            .and(query_param("environment", "dev"))
            .and(query_param("rowkey", "lcpdevuks-0001"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .delete_vm_name("dev", "lcpdevuks-0001")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(409).set_body_string("name is in use"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .delete_vm_name("dev", "lcpdevuks-0001")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Api(_)));
    }
}
