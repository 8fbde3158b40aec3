//! Integration tests for the VPC client using wiremock
//!
//! These tests drive real `VpcService` operations against mocked endpoints,
//! checking the wire format of requests and the handling of responses.

use serde_json::{json, Value};
use vpcbeta::{
    AsPatch, Authenticator, DeleteBackupPolicyPlanOptions, DeleteShareOptions, DeleteVolumeOptions,
    DeleteVpcOptions, Error, GetSecurityGroupRuleOptions, GetVpcOptions,
    GetVpnServerClientConfigurationOptions, IamAuthenticator, LifecycleState, ListSubnetsOptions,
    ListVpcsOptions, PatchField, SecurityGroupRuleProtocol, SecurityGroupRuleRemote, ServiceConfig,
    UpdateVpcOptions, VpcPatch, VpcService,
};
use wiremock::matchers::{bearer_token, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn service_for(server: &MockServer, authenticator: Authenticator) -> VpcService {
    let config = ServiceConfig::new(authenticator).with_service_url(format!("{}/v1", server.uri()));
    VpcService::new(config).expect("valid config")
}

fn bearer_service(server: &MockServer) -> VpcService {
    service_for(server, Authenticator::BearerToken(TOKEN.to_string()))
}

fn vpc_json(id: &str, name: &str) -> Value {
    json!({
        "classic_access": false,
        "created_at": "2024-04-30T12:00:00Z",
        "crn": format!("crn:v1:bluemix:public:is:us-south:a/123::vpc:{id}"),
        "href": format!("https://us-south.iaas.cloud.ibm.com/v1/vpcs/{id}"),
        "id": id,
        "name": name,
        "resource_type": "vpc",
        "status": "available"
    })
}

fn subnet_json(id: &str) -> Value {
    json!({
        "available_ipv4_address_count": 251,
        "created_at": "2024-04-30T12:00:00Z",
        "crn": format!("crn:v1:bluemix:public:is:us-south-1:a/123::subnet:{id}"),
        "href": format!("https://us-south.iaas.cloud.ibm.com/v1/subnets/{id}"),
        "id": id,
        "ip_version": "ipv4",
        "ipv4_cidr_block": "10.240.0.0/24",
        "name": format!("subnet-{id}"),
        "network_acl": {"href": "https://us-south.iaas.cloud.ibm.com/v1/network_acls/acl-1", "id": "acl-1"},
        "resource_type": "subnet",
        "status": "available",
        "total_ipv4_address_count": 256,
        "vpc": {"href": "https://us-south.iaas.cloud.ibm.com/v1/vpcs/vpc-1", "id": "vpc-1"},
        "zone": {"href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1", "name": "us-south-1"}
    })
}

/// Test module for request wire format
mod request_tests {
    use super::*;

    /// Every request carries the API version and generation
    #[tokio::test]
    async fn test_version_and_generation_on_every_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/vpcs"))
            .and(query_param("version", "2024-04-30"))
            .and(query_param("generation", "2"))
            .and(query_param("limit", "10"))
            .and(bearer_token(TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/vpcs?limit=10"},
                "limit": 10,
                "total_count": 1,
                "vpcs": [vpc_json("vpc-1", "my-vpc")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let response = service
            .list_vpcs(&ListVpcsOptions {
                limit: Some(10),
                ..Default::default()
            })
            .await
            .expect("list should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.result.vpcs.len(), 1);
        assert_eq!(response.result.vpcs[0].name, "my-vpc");
        assert!(response.result.next.is_none());
    }

    /// A custom version replaces the default one
    #[tokio::test]
    async fn test_custom_version() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/vpcs/vpc-1"))
            .and(query_param("version", "2025-01-15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vpc_json("vpc-1", "my-vpc")))
            .expect(1)
            .mount(&server)
            .await;

        let config = ServiceConfig::new(Authenticator::NoAuth)
            .with_service_url(format!("{}/v1", server.uri()))
            .with_version("2025-01-15");
        let service = VpcService::new(config).unwrap();

        let vpc = service.get_vpc(&GetVpcOptions::new("vpc-1")).await.unwrap();
        assert_eq!(vpc.result.id, "vpc-1");
    }

    /// An IAM API key is exchanged once and the token reused
    #[tokio::test]
    async fn test_iam_token_exchange_is_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "iam-access-token",
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/vpcs/vpc-1"))
            .and(bearer_token("iam-access-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vpc_json("vpc-1", "my-vpc")))
            .expect(2)
            .mount(&server)
            .await;

        let iam = IamAuthenticator::new("my-api-key").unwrap().with_url(server.uri());
        let service = service_for(&server, Authenticator::Iam(iam));

        service.get_vpc(&GetVpcOptions::new("vpc-1")).await.unwrap();
        service.get_vpc(&GetVpcOptions::new("vpc-1")).await.unwrap();
    }

    /// A failed token exchange surfaces as an authentication error
    #[tokio::test]
    async fn test_iam_failure_is_authentication_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errorCode": "BXNIM0415E",
                "errorMessage": "Provided API key could not be found."
            })))
            .mount(&server)
            .await;

        let iam = IamAuthenticator::new("bad-key").unwrap().with_url(server.uri());
        let service = service_for(&server, Authenticator::Iam(iam));

        let err = service.get_vpc(&GetVpcOptions::new("vpc-1")).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    /// If-Match is sent only when a token is supplied
    #[tokio::test]
    async fn test_if_match_present_and_absent() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/vpcs/vpc-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        let service = bearer_service(&server);

        let response = service
            .delete_vpc(&DeleteVpcOptions {
                if_match: Some("W/\"96d225c4-56bd-43d9-98fc-d7148e5c5028\"".to_string()),
                ..DeleteVpcOptions::new("vpc-1")
            })
            .await
            .expect("conditional delete should succeed");
        assert_eq!(response.status, 204);

        service
            .delete_vpc(&DeleteVpcOptions::new("vpc-1"))
            .await
            .expect("unconditional delete should succeed");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].headers.get("if-match").unwrap(),
            "W/\"96d225c4-56bd-43d9-98fc-d7148e5c5028\""
        );
        assert!(requests[1].headers.get("if-match").is_none());
    }

    /// Updates send a merge-patch document, with explicit nulls preserved
    #[tokio::test]
    async fn test_update_sends_merge_patch() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/v1/vpcs/vpc-1"))
            .and(header("content-type", "application/merge-patch+json"))
            .and(body_json(json!({"name": "my-vpc-renamed"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("etag", "W/\"new-etag\"")
                    .set_body_json(vpc_json("vpc-1", "my-vpc-renamed")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let patch = VpcPatch {
            name: "my-vpc-renamed".into(),
        }
        .as_patch()
        .unwrap();

        let response = service
            .update_vpc(&UpdateVpcOptions::new("vpc-1", patch))
            .await
            .expect("update should succeed");

        assert_eq!(response.result.name, "my-vpc-renamed");
        assert_eq!(response.etag(), Some("W/\"new-etag\""));
    }

    /// A field set to null travels as JSON null, not as an absent key
    #[tokio::test]
    async fn test_null_patch_field_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/v1/vpcs/vpc-1"))
            .and(body_json(json!({"name": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(vpc_json("vpc-1", "generated-name")))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let patch = VpcPatch {
            name: PatchField::Null,
        }
        .as_patch()
        .unwrap();

        service
            .update_vpc(&UpdateVpcOptions::new("vpc-1", patch))
            .await
            .expect("update should succeed");
    }

    /// A token that cannot travel as a header fails the call instead of
    /// being dropped and turning the delete unconditional
    #[tokio::test]
    async fn test_invalid_if_match_is_rejected_before_network() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/volumes/vol-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let err = service
            .delete_volume(&DeleteVolumeOptions {
                if_match: Some("W/\"tok\nen\"".to_string()),
                ..DeleteVolumeOptions::new("vol-1")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref name) if name == "If-Match"));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    /// Missing path parameters fail without touching the network
    #[tokio::test]
    async fn test_validation_before_network() {
        let server = MockServer::start().await;
        let service = bearer_service(&server);

        let err = service.get_vpc(&GetVpcOptions::new("")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref name) if name == "id"));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    /// A plain-text operation asks for text and returns the body as is
    #[tokio::test]
    async fn test_client_configuration_is_text() {
        let server = MockServer::start().await;
        let ovpn = "client\nproto udp\ndev tun\nremote 192.0.2.7 443\n";

        Mock::given(method("GET"))
            .and(path("/v1/vpn_servers/vs-1/client_configuration"))
            .and(header("accept", "text/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ovpn))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let response = service
            .get_vpn_server_client_configuration(&GetVpnServerClientConfigurationOptions::new("vs-1"))
            .await
            .expect("configuration should be returned");

        assert_eq!(response.result, ovpn);
    }
}

/// Test module for response handling
mod response_tests {
    use super::*;

    /// 404 responses become service errors with the parsed details
    #[tokio::test]
    async fn test_404_maps_to_service_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/vpcs/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{
                    "code": "not_found",
                    "message": "VPC not found",
                    "more_info": "https://cloud.ibm.com/docs/vpc?topic=vpc-rias-error-messages#not_found"
                }],
                "trace": "4e1b4a4c-1f3b-4fa1-8e4b-0ab2b5f3c4d0"
            })))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let err = service.get_vpc(&GetVpcOptions::new("missing")).await.unwrap_err();

        assert!(err.is_not_found());
        let service_error = err.service_error().expect("should be a service error");
        assert_eq!(service_error.code(), Some("not_found"));
        assert_eq!(service_error.message(), Some("VPC not found"));
        assert_eq!(
            service_error.trace.as_deref(),
            Some("4e1b4a4c-1f3b-4fa1-8e4b-0ab2b5f3c4d0")
        );
    }

    /// Error bodies that are not JSON still yield a service error
    #[tokio::test]
    async fn test_500_with_html_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/vpcs/vpc-1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let err = service.get_vpc(&GetVpcOptions::new("vpc-1")).await.unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(502));
        let service_error = err.service_error().unwrap();
        assert!(service_error.errors.is_empty());
        assert!(service_error.body.contains("Bad Gateway"));
    }

    /// A precondition failure is recognisable
    #[tokio::test]
    async fn test_412_is_precondition_failed() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/vpcs/vpc-1"))
            .respond_with(ResponseTemplate::new(412).set_body_json(json!({
                "errors": [{"code": "precondition_failed", "message": "If-Match did not match"}]
            })))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let err = service
            .delete_vpc(&DeleteVpcOptions {
                if_match: Some("W/\"stale\"".to_string()),
                ..DeleteVpcOptions::new("vpc-1")
            })
            .await
            .unwrap_err();

        assert!(err.is_precondition_failed());
    }

    /// A success body of the wrong shape is a decoding error
    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/vpcs/vpc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 42"))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let err = service.get_vpc(&GetVpcOptions::new("vpc-1")).await.unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }));
    }

    /// An accepted share delete hands back the share in its deleting state
    #[tokio::test]
    async fn test_accepted_share_delete_returns_share() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/shares/share-1"))
            .and(header("if-match", "W/\"share-etag\""))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "created_at": "2024-04-30T12:00:00Z",
                "crn": "crn:v1:bluemix:public:is:us-south-1:a/123::share:share-1",
                "encryption": "provider_managed",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/shares/share-1",
                "id": "share-1",
                "iops": 3000,
                "lifecycle_state": "deleting",
                "name": "my-share",
                "profile": {"href": "https://us-south.iaas.cloud.ibm.com/v1/share/profiles/tier-3iops", "name": "tier-3iops"},
                "replication_role": "none",
                "replication_status": "none",
                "resource_type": "share",
                "size": 200,
                "zone": {"href": "https://us-south.iaas.cloud.ibm.com/v1/regions/us-south/zones/us-south-1", "name": "us-south-1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let response = service
            .delete_share(&DeleteShareOptions {
                if_match: Some("W/\"share-etag\"".to_string()),
                ..DeleteShareOptions::new("share-1")
            })
            .await
            .expect("delete should be accepted");

        assert_eq!(response.status, 202);
        assert_eq!(response.result.id, "share-1");
        assert_eq!(response.result.lifecycle_state, LifecycleState::Deleting);
    }

    /// An accepted backup plan delete decodes the plan it removed
    #[tokio::test]
    async fn test_accepted_backup_plan_delete_returns_plan() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/backup_policies/bp-1/plans/plan-1"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "active": true,
                "copy_user_tags": true,
                "created_at": "2024-04-30T12:00:00Z",
                "cron_spec": "30 */2 * * 1-5",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/backup_policies/bp-1/plans/plan-1",
                "id": "plan-1",
                "lifecycle_state": "deleting",
                "name": "my-plan",
                "resource_type": "backup_policy_plan"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let plan = service
            .delete_backup_policy_plan(&DeleteBackupPolicyPlanOptions::new("bp-1", "plan-1"))
            .await
            .expect("delete should be accepted")
            .into_result();

        assert_eq!(plan.cron_spec, "30 */2 * * 1-5");
        assert_eq!(plan.lifecycle_state, LifecycleState::Deleting);
    }

    /// Polymorphic rules decode into the variant named by their protocol
    #[tokio::test]
    async fn test_polymorphic_rule_decode() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/security_groups/sg-1/rules/rule-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "direction": "inbound",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/security_groups/sg-1/rules/rule-1",
                "id": "rule-1",
                "ip_version": "ipv4",
                "port_max": 22,
                "port_min": 22,
                "protocol": "tcp",
                "remote": {"cidr_block": "192.0.2.0/24"}
            })))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let rule = service
            .get_security_group_rule(&GetSecurityGroupRuleOptions::new("sg-1", "rule-1"))
            .await
            .unwrap()
            .into_result();

        match rule.protocol {
            SecurityGroupRuleProtocol::Tcp(ports) => {
                assert_eq!(ports.port_min, Some(22));
                assert_eq!(ports.port_max, Some(22));
            },
            other => panic!("expected tcp rule, got {:?}", other),
        }
        assert_eq!(
            rule.remote,
            Some(SecurityGroupRuleRemote::CidrBlock {
                cidr_block: "192.0.2.0/24".to_string()
            })
        );
    }
}

/// Test module for list continuation
mod pager_tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    async fn mount_two_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/subnets"))
            .and(query_param("start", "page-2-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets?limit=2"},
                "limit": 2,
                "subnets": [subnet_json("s-3")],
                "total_count": 3
            })))
            .with_priority(1)
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/subnets"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets?limit=2"},
                "limit": 2,
                "next": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets?limit=2&start=page-2-token"},
                "subnets": [subnet_json("s-1"), subnet_json("s-2")],
                "total_count": 3
            })))
            .mount(server)
            .await;
    }

    fn two_per_page() -> ListSubnetsOptions {
        ListSubnetsOptions {
            limit: Some(2),
            ..Default::default()
        }
    }

    /// Pages are fetched in order until no next link remains
    #[tokio::test]
    async fn test_pager_walks_pages_then_exhausts() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let service = bearer_service(&server);
        let mut pager = service.pager(two_per_page());

        assert!(pager.has_next());
        let first = pager.get_next().await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(pager.has_next());

        let second = pager.get_next().await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, "s-3");
        assert!(!pager.has_next());

        let err = pager.get_next().await.unwrap_err();
        assert!(matches!(err, Error::Exhausted));
    }

    /// get_all concatenates every page
    #[tokio::test]
    async fn test_pager_get_all() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let service = bearer_service(&server);
        let subnets = service.pager(two_per_page()).get_all().await.unwrap();

        let ids: Vec<_> = subnets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s-1", "s-2", "s-3"]);
    }

    /// The stream yields one item per page and then ends
    #[tokio::test]
    async fn test_pager_stream() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let service = bearer_service(&server);
        let pages: Vec<_> = service.pager(two_per_page()).into_stream().collect().await;

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|page| page.is_ok()));
    }

    /// Log lines captured from the client's tracing output
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// A next link without a start token ends the listing, with a warning
    #[tokio::test]
    async fn test_next_link_without_start_ends_listing() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/subnets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets?limit=2"},
                "limit": 2,
                "next": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets?limit=2"},
                "subnets": [subnet_json("s-1"), subnet_json("s-2")],
                "total_count": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let subnets = service.pager(two_per_page()).get_all().await.unwrap();

        assert_eq!(subnets.len(), 2);
        let output = logs.contents();
        assert!(output.contains("WARN"), "no warning logged: {output}");
        assert!(output.contains("has no start token"));
    }

    /// A failed page leaves the pager where it was
    #[tokio::test]
    async fn test_pager_error_keeps_position() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/subnets"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "errors": [{"code": "service_unavailable", "message": "try again"}]
            })))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let mut pager = service.pager(two_per_page());

        let err = pager.get_next().await.unwrap_err();
        assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
        assert!(pager.has_next());
    }
}

/// Test module for snapshot, key and VPN policy operations
mod family_tests {
    use super::*;
    use vpcbeta::{
        CreateKeyOptions, DeleteSnapshotOptions, DeleteSnapshotsOptions,
        ListIkePolicyConnectionsOptions, ListKeysOptions,
    };

    /// Bulk snapshot delete filters on the source volume
    #[tokio::test]
    async fn test_delete_snapshots_by_source_volume() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/snapshots"))
            .and(query_param("source_volume.id", "vol-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let response = service
            .delete_snapshots(&DeleteSnapshotsOptions::new("vol-1"))
            .await
            .expect("bulk delete should succeed");
        assert_eq!(response.status, 204);
    }

    /// Bulk snapshot delete without a volume never reaches the service
    #[tokio::test]
    async fn test_delete_snapshots_requires_volume() {
        let server = MockServer::start().await;
        let service = bearer_service(&server);

        let err = service
            .delete_snapshots(&DeleteSnapshotsOptions::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref name) if name == "source_volume.id"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    /// Single snapshot delete carries the concurrency token
    #[tokio::test]
    async fn test_delete_snapshot_if_match() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/snapshots/snap-1"))
            .and(header("if-match", "W/\"snap-etag\""))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        service
            .delete_snapshot(&DeleteSnapshotOptions {
                if_match: Some("W/\"snap-etag\"".to_string()),
                ..DeleteSnapshotOptions::new("snap-1")
            })
            .await
            .expect("conditional delete should succeed");
    }

    /// Keys list and decode with the `type` field
    #[tokio::test]
    async fn test_list_keys() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/keys"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/keys?limit=50"},
                "keys": [{
                    "created_at": "2024-04-30T12:00:00Z",
                    "crn": "crn:v1:bluemix:public:is:us-south:a/123::key:key-1",
                    "fingerprint": "SHA256:yxavE4CIOL2NlsqcurRO3xGjkP6m/0mp8ugojH5yxlY",
                    "href": "https://us-south.iaas.cloud.ibm.com/v1/keys/key-1",
                    "id": "key-1",
                    "length": 256,
                    "name": "my-key",
                    "public_key": "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIFk",
                    "type": "ed25519"
                }],
                "limit": 50
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let keys = service
            .list_keys(&ListKeysOptions::default())
            .await
            .expect("list should succeed")
            .into_result();
        assert_eq!(keys.keys[0].key_type, "ed25519");
        assert!(keys.next.is_none());
    }

    /// A key without public material is rejected locally
    #[tokio::test]
    async fn test_create_key_requires_public_key() {
        let server = MockServer::start().await;
        let service = bearer_service(&server);

        let err = service.create_key(&CreateKeyOptions::new("")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref name) if name == "public_key"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    /// Connections of an IKE policy decode by mode
    #[tokio::test]
    async fn test_list_ike_policy_connections() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ike_policies/ike-1/connections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "connections": [{
                    "admin_state_up": true,
                    "authentication_mode": "psk",
                    "created_at": "2024-04-30T12:00:00Z",
                    "dead_peer_detection": {"action": "restart", "interval": 30, "timeout": 120},
                    "href": "https://us-south.iaas.cloud.ibm.com/v1/vpn_gateways/gw-1/connections/c-1",
                    "id": "c-1",
                    "ike_policy": {"href": "https://us-south.iaas.cloud.ibm.com/v1/ike_policies/ike-1", "id": "ike-1"},
                    "mode": "policy",
                    "local_cidrs": ["192.168.1.0/24"],
                    "name": "my-connection",
                    "peer_address": "169.21.50.5",
                    "peer_cidrs": ["10.45.1.0/24"],
                    "psk": "lkj14b1oi0alcniejkso",
                    "resource_type": "vpn_gateway_connection",
                    "status": "up"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let connections = service
            .list_ike_policy_connections(&ListIkePolicyConnectionsOptions::new("ike-1"))
            .await
            .expect("list should succeed")
            .into_result()
            .connections;

        assert_eq!(connections.len(), 1);
        assert!(matches!(
            connections[0].mode,
            vpcbeta::VpnGatewayConnectionMode::Policy { ref local_cidrs, .. } if local_cidrs[0] == "192.168.1.0/24"
        ));
    }
}

/// Test module for bare metal servers, instance templates and instance groups
mod provisioning_tests {
    use super::*;
    use vpcbeta::{
        BareMetalServerNetworkInterfaceType, CreateInstanceGroupManagerActionOptions,
        CreateInstanceGroupOptions, DeleteInstanceGroupMembershipsOptions,
        GetInstanceGroupManagerOptions, GetInstanceTemplateOptions, Identity,
        InstanceGroupManagerActionPrototype, InstanceGroupManagerType,
        ListBareMetalServerNetworkInterfacesOptions, ListInstanceGroupMembershipsOptions,
        ScheduledActionGroup, ScheduledActionTarget, StartBareMetalServerOptions,
        StopBareMetalServerOptions,
    };

    fn membership_json(id: &str) -> Value {
        json!({
            "created_at": "2024-04-30T12:00:00Z",
            "delete_instance_on_membership_delete": true,
            "href": format!("https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/memberships/{id}"),
            "id": id,
            "instance": {
                "crn": "crn:v1:bluemix:public:is:us-south-1:a/123::instance:ins-1",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instances/ins-1",
                "id": "ins-1",
                "name": "my-instance"
            },
            "instance_template": {
                "crn": "crn:v1:bluemix:public:is:us-south:a/123::instance-template:tpl-1",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instance/templates/tpl-1",
                "id": "tpl-1",
                "name": "my-template"
            },
            "name": format!("membership-{id}"),
            "status": "healthy"
        })
    }

    /// Stopping a server posts the stop type
    #[tokio::test]
    async fn test_stop_bare_metal_server_sends_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/bare_metal_servers/bms-1/stop"))
            .and(body_json(json!({"type": "soft"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let response = service
            .stop_bare_metal_server(&StopBareMetalServerOptions::new("bms-1", "soft"))
            .await
            .expect("stop should succeed");
        assert_eq!(response.status, 204);
    }

    /// Starting a server sends no body
    #[tokio::test]
    async fn test_start_bare_metal_server_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/bare_metal_servers/bms-1/start"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        service
            .start_bare_metal_server(&StartBareMetalServerOptions::new("bms-1"))
            .await
            .expect("start should succeed");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    /// Network interfaces decode by interface type
    #[tokio::test]
    async fn test_list_bare_metal_server_network_interfaces() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/bare_metal_servers/bms-1/network_interfaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/bare_metal_servers/bms-1/network_interfaces?limit=50"},
                "limit": 50,
                "network_interfaces": [{
                    "allow_interface_to_float": false,
                    "allow_ip_spoofing": false,
                    "created_at": "2024-04-30T12:00:00Z",
                    "enable_infrastructure_nat": true,
                    "href": "https://us-south.iaas.cloud.ibm.com/v1/bare_metal_servers/bms-1/network_interfaces/nic-2",
                    "id": "nic-2",
                    "interface_type": "vlan",
                    "name": "my-vlan-nic",
                    "primary_ip": {
                        "address": "10.0.0.33",
                        "href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/sn-1/reserved_ips/ip-2",
                        "id": "ip-2",
                        "name": "my-vlan-ip"
                    },
                    "status": "available",
                    "subnet": {"href": "https://us-south.iaas.cloud.ibm.com/v1/subnets/sn-1", "id": "sn-1"},
                    "type": "secondary",
                    "vlan": 4
                }],
                "total_count": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let interfaces = service
            .list_bare_metal_server_network_interfaces(&ListBareMetalServerNetworkInterfacesOptions::new("bms-1"))
            .await
            .expect("list should succeed")
            .into_result()
            .network_interfaces;

        assert_eq!(interfaces[0].role, "secondary");
        assert!(matches!(
            interfaces[0].interface_type,
            BareMetalServerNetworkInterfaceType::Vlan { vlan: 4, .. }
        ));
    }

    /// A template reads back the prototype it was created from
    #[tokio::test]
    async fn test_get_instance_template() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/instance/templates/tpl-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created_at": "2024-04-30T12:00:00Z",
                "crn": "crn:v1:bluemix:public:is:us-south:a/123::instance-template:tpl-1",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instance/templates/tpl-1",
                "id": "tpl-1",
                "image": {"id": "r006-image"},
                "keys": [{"id": "r006-key"}],
                "name": "my-template",
                "primary_network_interface": {"subnet": {"id": "sn-1"}},
                "profile": {"name": "bx2-2x8"},
                "vpc": {"id": "vpc-1"},
                "zone": {"name": "us-south-1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let template = service
            .get_instance_template(&GetInstanceTemplateOptions::new("tpl-1"))
            .await
            .expect("get should succeed")
            .into_result();

        assert_eq!(template.name(), Some("my-template"));
        assert_eq!(template.prototype.profile, Some(Identity::name("bx2-2x8")));
    }

    /// A group without subnets never reaches the service
    #[tokio::test]
    async fn test_create_instance_group_requires_subnets() {
        let server = MockServer::start().await;
        let service = bearer_service(&server);

        let err = service
            .create_instance_group(&CreateInstanceGroupOptions::new(Identity::id("tpl-1"), Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref name) if name == "subnets"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    /// Scheduled managers decode with their actions
    #[tokio::test]
    async fn test_get_scheduled_instance_group_manager() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/instance_groups/ig-1/managers/m-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "actions": [{
                    "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-2/actions/a-1",
                    "id": "a-1",
                    "name": "my-action"
                }],
                "created_at": "2024-04-30T12:00:00Z",
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-2",
                "id": "m-2",
                "management_enabled": true,
                "manager_type": "scheduled",
                "name": "my-scheduled-manager"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let manager = service
            .get_instance_group_manager(&GetInstanceGroupManagerOptions::new("ig-1", "m-2"))
            .await
            .expect("get should succeed")
            .into_result();

        match manager.manager_type {
            InstanceGroupManagerType::Scheduled { actions } => assert_eq!(actions[0].id, "a-1"),
            other => panic!("expected scheduled manager, got {other:?}"),
        }
    }

    /// Scheduled actions send and decode their group target
    #[tokio::test]
    async fn test_create_group_action_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/instance_groups/ig-1/managers/m-2/actions"))
            .and(body_json(json!({
                "cron_spec": "0 8 * * *",
                "group": {"membership_count": 3}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "auto_delete": false,
                "auto_delete_timeout": 24,
                "created_at": "2024-04-30T12:00:00Z",
                "cron_spec": "0 8 * * *",
                "group": {"membership_count": 3},
                "href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/managers/m-2/actions/a-2",
                "id": "a-2",
                "name": "morning",
                "status": "active"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let mut prototype =
            InstanceGroupManagerActionPrototype::new(ScheduledActionTarget::Group(ScheduledActionGroup {
                membership_count: 3,
            }));
        prototype.cron_spec = Some("0 8 * * *".to_string());
        let action = service
            .create_instance_group_manager_action(&CreateInstanceGroupManagerActionOptions::new(
                "ig-1", "m-2", prototype,
            ))
            .await
            .expect("create should succeed")
            .into_result();

        assert!(matches!(action.target, ScheduledActionTarget::Group(ref g) if g.membership_count == 3));
    }

    /// Deleting all memberships targets the memberships collection
    #[tokio::test]
    async fn test_delete_instance_group_memberships() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/instance_groups/ig-1/memberships"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let response = service
            .delete_instance_group_memberships(&DeleteInstanceGroupMembershipsOptions::new("ig-1"))
            .await
            .expect("delete should succeed");
        assert_eq!(response.status, 204);
    }

    /// Memberships page through the pager like any other list
    #[tokio::test]
    async fn test_membership_pager_follows_next() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/instance_groups/ig-1/memberships"))
            .and(query_param("start", "m-page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/memberships?limit=1"},
                "limit": 1,
                "memberships": [membership_json("mem-2")],
                "total_count": 2
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/instance_groups/ig-1/memberships"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first": {"href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/memberships?limit=1"},
                "limit": 1,
                "memberships": [membership_json("mem-1")],
                "next": {"href": "https://us-south.iaas.cloud.ibm.com/v1/instance_groups/ig-1/memberships?limit=1&start=m-page-2"},
                "total_count": 2
            })))
            .mount(&server)
            .await;

        let service = bearer_service(&server);
        let options = ListInstanceGroupMembershipsOptions {
            limit: Some(1),
            ..ListInstanceGroupMembershipsOptions::new("ig-1")
        };
        let memberships = service.pager(options).get_all().await.unwrap();

        let ids: Vec<_> = memberships.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["mem-1", "mem-2"]);
    }
}
