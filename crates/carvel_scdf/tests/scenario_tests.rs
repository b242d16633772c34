//! Package scenarios driven through the mock renderer.
//!
//! Each fixture is a stream captured from rendering the package with the
//! values named in its test.

use std::sync::Arc;

use carvel_k8s::{container_env_value, Container};
use carvel_scdf::{
    DataValues, PackageError, RenderedPackage, ScdfPackage, CTR_IMAGE_TAG,
    DEFAULT_REGISTRY_SECRET, KAFKA_BROKER_NAME, RABBITMQ_NAME, RABBIT_ENV_HOST, RABBIT_ENV_PASSWORD,
    RABBIT_ENV_PORT, RABBIT_ENV_USERNAME, SCDF_SERVER_NAME, SERVER_IMAGE_TAG,
    SERVER_TASK_PULL_SECRET_PATH, SKIPPER_IMAGE_TAG, SKIPPER_NAME, SKIPPER_PULL_SECRET_PATH,
};
use carvel_ytt::{MockRenderer, MockResponse};

const DEFAULT_RENDER: &str = include_str!("fixtures/default.yaml");
const RABBIT_EXTERNAL_RENDER: &str = include_str!("fixtures/rabbit_external.yaml");
const REGISTRY_SECRET_RENDER: &str = include_str!("fixtures/registry_secret.yaml");
const MISSING_VALUES_STDERR: &str = include_str!("fixtures/missing_values.txt");
const LOAD_BALANCER_RENDER: &str = include_str!("fixtures/load_balancer.yaml");
const DIGESTED_IMAGES_RENDER: &str = include_str!("fixtures/digested_images.yaml");
const CTR_IMAGE_RENDER: &str = include_str!("fixtures/ctr_image.yaml");
const KAFKA_CONFIG_RENDER: &str = include_str!("fixtures/kafka_config.yaml");
const MONITORING_RENDER: &str = include_str!("fixtures/monitoring.yaml");
const DASHBOARD_RENDER: &str = include_str!("fixtures/dashboard.yaml");
const EXTRA_ENV_RENDER: &str = include_str!("fixtures/extra_env.yaml");
const CONTEXT_PATH_RENDER: &str = include_str!("fixtures/context_path.yaml");
const RESOURCES_RENDER: &str = include_str!("fixtures/resources.yaml");

const CTR_URI_ENV: &str = "SPRING_CLOUD_DATAFLOW_TASK_COMPOSEDTASKRUNNER_URI";
const SERVER_DEBUG_OPTS: &str =
    "-agentlib:jdwp=transport=dt_socket,server=y,suspend=n,address=0.0.0.0:5005";
const SKIPPER_DEBUG_OPTS: &str =
    "-agentlib:jdwp=transport=dt_socket,server=y,suspend=n,address=0.0.0.0:5006";

fn package_with(response: MockResponse) -> (ScdfPackage, MockRenderer) {
    let mock = MockRenderer::new().add_response(response);
    let package = ScdfPackage::new(Arc::new(mock.clone())).with_config_dir("config");
    (package, mock)
}

/// Render `values` against a captured stream; returns the manifests and the
/// YAML-valued assignments the renderer saw.
async fn render_fixture(fixture: &str, values: &DataValues) -> (RenderedPackage, Vec<String>) {
    let (package, mock) = package_with(MockResponse::success(fixture));
    let rendered = package.render_manifests(values).await.unwrap();
    let yamls = mock.rendered_options().remove(0).data_value_yamls;
    (rendered, yamls)
}

fn kafka_values() -> DataValues {
    DataValues::required().external_kafka("localhost", 1234, "localhost", 1235)
}

fn assert_env(container: &Container, expected: &[(&str, &str)]) {
    for (name, value) in expected {
        assert_eq!(
            container_env_value(container, name),
            Some(*value),
            "{} of {}",
            name,
            container.name
        );
    }
}

fn assert_resources(container: &Container, cpu: &str, memory: &str, limits: bool) {
    let resources = container.resources.as_ref().unwrap();
    assert_eq!(resources.request("cpu").as_deref(), Some(cpu));
    assert_eq!(resources.request("memory").as_deref(), Some(memory));
    if limits {
        assert_eq!(resources.limit("cpu").as_deref(), Some(cpu));
        assert_eq!(resources.limit("memory").as_deref(), Some(memory));
    }
}

#[tokio::test]
async fn test_renders_with_required_versions() {
    let (package, mock) = package_with(MockResponse::success(DEFAULT_RENDER));

    let output = package.render(&DataValues::required()).await.unwrap();
    assert!(output.success);
    assert!(!output.stdout.is_empty());

    let options = mock.rendered_options();
    assert_eq!(options.len(), 1);
    assert_eq!(
        options[0].to_args(),
        vec![
            "--file",
            "config",
            "--data-value-yaml",
            "scdf.server.image.tag=2.8.1",
            "--data-value-yaml",
            "scdf.skipper.image.tag=2.7.1",
            "--data-value-yaml",
            "scdf.ctr.image.tag=2.8.1",
        ]
    );
}

#[tokio::test]
async fn test_fails_without_required_versions() {
    let (package, _) = package_with(MockResponse::failure(1, MISSING_VALUES_STDERR));

    let output = package.render(&DataValues::new()).await.unwrap();
    assert!(!output.success);
    for key in [SERVER_IMAGE_TAG, SKIPPER_IMAGE_TAG, CTR_IMAGE_TAG] {
        assert!(output.stderr.contains(key), "stderr should name {key}");
    }

    let err = package.render_manifests(&DataValues::new()).await.unwrap_err();
    assert!(matches!(err, PackageError::RenderFailed { exit_code: 1, .. }));
}

#[tokio::test]
async fn test_external_rabbit_skips_broker() {
    let (package, mock) = package_with(MockResponse::success(RABBIT_EXTERNAL_RENDER));
    let values = DataValues::required().external_rabbit("localhost", 1234, "user", "pass");

    let rendered = package.render_manifests(&values).await.unwrap();
    assert!(rendered.deployment(RABBITMQ_NAME).unwrap().is_none());
    assert!(rendered.service(RABBITMQ_NAME).unwrap().is_none());

    let env = rendered.skipper_platform_environment().unwrap();
    assert_eq!(env[RABBIT_ENV_HOST], "localhost");
    assert_eq!(env[RABBIT_ENV_PORT], "1234");
    assert_eq!(env[RABBIT_ENV_USERNAME], "user");
    assert_eq!(env[RABBIT_ENV_PASSWORD], "pass");

    let options = mock.rendered_options().remove(0);
    assert!(options.data_value_yamls.contains(&"scdf.binder.type=rabbit".to_string()));
    assert!(options.data_value_yamls.contains(&"scdf.binder.rabbit.port=1234".to_string()));
    assert_eq!(
        options.data_values,
        vec![
            "scdf.binder.rabbit.host=localhost",
            "scdf.binder.rabbit.username=user",
            "scdf.binder.rabbit.password=pass",
        ]
    );
}

#[tokio::test]
async fn test_custom_registry_secret_everywhere() {
    let (package, _) = package_with(MockResponse::success(REGISTRY_SECRET_RENDER));
    let values = DataValues::required().registry_secret_ref("fakeref");

    let rendered = package.render_manifests(&values).await.unwrap();

    let pod_specs = rendered.pod_specs_with_image_pull_secrets().unwrap();
    assert_eq!(pod_specs.len(), 4);
    for pod_spec in &pod_specs {
        assert_eq!(pod_spec.image_pull_secret_names(), vec!["fakeref"]);
    }
    // Deployments in document order, then the StatefulSet
    assert!(pod_specs[0].container(RABBITMQ_NAME).is_some());
    assert!(pod_specs[3].container("db").is_some());

    assert!(rendered.secret(DEFAULT_REGISTRY_SECRET).unwrap().is_none());
    assert_eq!(rendered.image_pull_secret_names().unwrap(), vec!["fakeref"]);
    assert_eq!(
        rendered
            .application_config_value(SCDF_SERVER_NAME, SERVER_TASK_PULL_SECRET_PATH)
            .unwrap()
            .as_deref(),
        Some("fakeref")
    );
    assert_eq!(
        rendered
            .application_config_value(SKIPPER_NAME, SKIPPER_PULL_SECRET_PATH)
            .unwrap()
            .as_deref(),
        Some("fakeref")
    );
}

#[test]
fn test_default_render_has_generated_registry_secret() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);

    let secret = rendered.secret(DEFAULT_REGISTRY_SECRET).unwrap().unwrap();
    assert_eq!(
        secret.secret_type.as_deref(),
        Some("kubernetes.io/dockerconfigjson")
    );
    assert_eq!(
        rendered.image_pull_secret_names().unwrap(),
        vec![DEFAULT_REGISTRY_SECRET]
    );
}

#[test]
fn test_default_render_deploys_rabbit() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);

    assert!(rendered.deployment(RABBITMQ_NAME).unwrap().is_some());
    let service = rendered.service(RABBITMQ_NAME).unwrap().unwrap();
    assert_eq!(service.port("amqp").map(|p| p.port), Some(5672));

    let env = rendered.skipper_platform_environment().unwrap();
    assert_eq!(env[RABBIT_ENV_HOST], "rabbitmq");
    assert_eq!(env.len(), 4);
}

#[test]
fn test_server_container() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);
    let container = rendered.server_container().unwrap().unwrap();

    assert_eq!(
        container.image.as_deref(),
        Some("springcloud/spring-cloud-dataflow-server:2.8.1")
    );
    assert_eq!(container.env.len(), 12);
    assert_eq!(
        container_env_value(&container, "SPRING_CLOUD_DATAFLOW_TASK_COMPOSEDTASKRUNNER_URI"),
        Some("docker://springcloud/spring-cloud-dataflow-composed-task-runner:2.8.1")
    );
    assert_eq!(container_env_value(&container, "SERVER_PORT"), Some("9393"));

    // fieldRef entries carry no literal value
    let namespace = container.env_var("KUBERNETES_NAMESPACE").unwrap();
    assert!(namespace.value.is_none());
    assert_eq!(
        namespace
            .value_from("fieldRef.fieldPath")
            .and_then(|v| v.as_str()),
        Some("metadata.namespace")
    );

    let resources = container.resources.as_ref().unwrap();
    assert_eq!(resources.limit("cpu").as_deref(), Some("1000m"));
    assert_eq!(resources.request("memory").as_deref(), Some("1024Mi"));

    let liveness = container.liveness_probe.as_ref().unwrap();
    assert_eq!(
        liveness.http_get.as_ref().and_then(|h| h.path.as_deref()),
        Some("/management/health")
    );
}

#[test]
fn test_skipper_container_and_config_volume() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);

    let container = rendered.skipper_container().unwrap().unwrap();
    assert_eq!(
        container.image.as_deref(),
        Some("springcloud/spring-cloud-skipper-server:2.7.1")
    );
    assert_eq!(
        container.volume_mount("config").map(|m| m.mount_path.as_str()),
        Some("/workspace/config")
    );

    let deployment = rendered.skipper_deployment().unwrap().unwrap();
    let volume = deployment.volume("config").unwrap();
    assert_eq!(volume.source_type(), Some("configMap"));
    assert_eq!(
        volume.source_field("configMap.name").and_then(|v| v.as_str()),
        Some(SKIPPER_NAME)
    );
}

#[test]
fn test_services_default_to_cluster_ip() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);

    for service in [
        rendered.server_service().unwrap().unwrap(),
        rendered.skipper_service().unwrap().unwrap(),
    ] {
        assert_eq!(service.spec.service_type.as_deref(), Some("ClusterIP"));
        assert_eq!(service.spec.ports[0].port, 80);
    }
}

#[test]
fn test_server_change_rules() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);
    let resource = rendered
        .resource("Deployment", SCDF_SERVER_NAME)
        .unwrap()
        .unwrap();

    assert_eq!(
        resource
            .metadata
            .annotation("kapp.k14s.io/change-group")
            .as_deref(),
        Some("scdf.tanzu.vmware.com/server")
    );
    assert_eq!(
        resource.metadata.annotations_containing("change-rule"),
        vec![
            "upsert after upserting scdf.tanzu.vmware.com/binder",
            "upsert after upserting scdf.tanzu.vmware.com/skipper",
        ]
    );
}

#[test]
fn test_server_application_config() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);
    let config = rendered.server_application_config().unwrap().unwrap();

    assert_eq!(
        config
            .get("spring.cloud.dataflow.task.platform.kubernetes.accounts.default.limits.memory")
            .and_then(|v| v.as_str()),
        Some("1024Mi")
    );
    assert_eq!(
        config
            .get("management.prometheus.metrics.export.enabled")
            .and_then(|v| v.as_bool()),
        Some(false)
    );
}

#[test]
fn test_document_count() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);
    assert_eq!(rendered.documents().unwrap().len(), 9);
}

#[tokio::test]
async fn test_load_balancer_service_types() {
    let values = DataValues::required()
        .server_service_type("LoadBalancer")
        .skipper_service_type("LoadBalancer");
    let (rendered, yamls) = render_fixture(LOAD_BALANCER_RENDER, &values).await;

    assert_eq!(
        &yamls[3..],
        &[
            "scdf.server.service.type=LoadBalancer",
            "scdf.skipper.service.type=LoadBalancer",
        ]
    );
    for service in [
        rendered.server_service().unwrap().unwrap(),
        rendered.skipper_service().unwrap().unwrap(),
    ] {
        assert_eq!(service.spec.service_type.as_deref(), Some("LoadBalancer"));
    }
}

#[tokio::test]
async fn test_digested_images() {
    let values = DataValues::new()
        .server_image_digest("fakedigest1")
        .skipper_image_digest("fakedigest2")
        .ctr_image_digest("fakedigest3");
    let (rendered, yamls) = render_fixture(DIGESTED_IMAGES_RENDER, &values).await;

    assert_eq!(
        yamls,
        vec![
            "scdf.server.image.digest=fakedigest1",
            "scdf.skipper.image.digest=fakedigest2",
            "scdf.ctr.image.digest=fakedigest3",
        ]
    );

    let server = rendered.server_container().unwrap().unwrap();
    assert_eq!(
        server.image.as_deref(),
        Some("springcloud/spring-cloud-dataflow-server@fakedigest1")
    );
    assert_env(
        &server,
        &[(
            CTR_URI_ENV,
            "docker://springcloud/spring-cloud-dataflow-composed-task-runner@fakedigest3",
        )],
    );

    let skipper = rendered.skipper_container().unwrap().unwrap();
    assert_eq!(
        skipper.image.as_deref(),
        Some("springcloud/spring-cloud-skipper-server@fakedigest2")
    );
}

#[tokio::test]
async fn test_ctr_image_repository_and_tag() {
    let values = DataValues::required()
        .server_image_repository("springcloud/spring-cloud-dataflow-server")
        .ctr_image_repository("fakerepo")
        .ctr_image_tag("faketag");
    let (rendered, yamls) = render_fixture(CTR_IMAGE_RENDER, &values).await;

    assert!(yamls.contains(&"scdf.ctr.image.repository=fakerepo".to_string()));
    // a later tag assignment overrides the required one
    assert_eq!(yamls.last().map(String::as_str), Some("scdf.ctr.image.tag=faketag"));

    let server = rendered.server_container().unwrap().unwrap();
    assert!(server
        .image
        .as_deref()
        .is_some_and(|image| image.starts_with("springcloud/spring-cloud-dataflow-server:")));
    assert_env(&server, &[(CTR_URI_ENV, "docker://fakerepo:faketag")]);
}

#[tokio::test]
async fn test_kafka_default_server_config() {
    let (rendered, yamls) = render_fixture(KAFKA_CONFIG_RENDER, &kafka_values()).await;
    assert!(yamls.contains(&"scdf.binder.type=kafka".to_string()));

    assert!(rendered.deployment(RABBITMQ_NAME).unwrap().is_none());
    assert!(rendered.deployment(KAFKA_BROKER_NAME).unwrap().is_none());

    let account = "platform.kubernetes.accounts.default";
    for (name, prefix) in [
        (SCDF_SERVER_NAME, "spring.cloud.dataflow.task"),
        (SKIPPER_NAME, "spring.cloud.skipper.server"),
    ] {
        let value = |key: &str| {
            rendered
                .application_config_value(name, &format!("{prefix}.{account}.{key}"))
                .unwrap()
        };
        assert_eq!(value("limits.memory").as_deref(), Some("1024Mi"), "{name}");
        assert_eq!(
            value("imagePullSecret").as_deref(),
            Some(DEFAULT_REGISTRY_SECRET),
            "{name}"
        );
    }

    let env = rendered.skipper_platform_environment().unwrap();
    assert_eq!(
        env["SPRING_CLOUD_STREAM_KAFKA_BINDER_BROKERS"],
        "localhost:1234"
    );
}

#[tokio::test]
async fn test_additional_server_config() {
    let values = kafka_values()
        .server_config("foo", "bar")
        .skipper_config("foo", "bar");
    let (rendered, yamls) = render_fixture(KAFKA_CONFIG_RENDER, &values).await;

    assert_eq!(
        &yamls[yamls.len() - 2..],
        &["scdf.server.config.foo=bar", "scdf.skipper.config.foo=bar"]
    );
    for config in [
        rendered.server_application_config().unwrap().unwrap(),
        rendered.skipper_application_config().unwrap().unwrap(),
    ] {
        assert_eq!(config.get("foo").and_then(|v| v.as_str()), Some("bar"));
    }
}

#[tokio::test]
async fn test_kafka_default_container_env() {
    let values = kafka_values().server_config("foo", "bar");
    let (rendered, _) = render_fixture(KAFKA_CONFIG_RENDER, &values).await;

    let skipper = rendered.skipper_container().unwrap().unwrap();
    assert_eq!(skipper.env.len(), 6);
    assert_env(
        &skipper,
        &[
            ("SPRING_CLOUD_CONFIG_ENABLED", "false"),
            ("SPRING_CLOUD_KUBERNETES_CONFIG_ENABLE_API", "false"),
            ("SPRING_CLOUD_KUBERNETES_SECRETS_ENABLE_API", "false"),
            ("SPRING_CLOUD_KUBERNETES_SECRETS_PATHS", "/workspace/runtime/secrets"),
        ],
    );

    let server = rendered.server_container().unwrap().unwrap();
    assert_eq!(server.env.len(), 12);
    assert_env(
        &server,
        &[
            ("SPRING_CLOUD_CONFIG_ENABLED", "false"),
            ("SPRING_CLOUD_DATAFLOW_FEATURES_ANALYTICS_ENABLED", "true"),
            ("SPRING_CLOUD_DATAFLOW_FEATURES_SCHEDULES_ENABLED", "true"),
            (
                CTR_URI_ENV,
                "docker://springcloud/spring-cloud-dataflow-composed-task-runner:2.8.1",
            ),
            ("SPRING_CLOUD_KUBERNETES_CONFIG_ENABLE_API", "false"),
            ("SPRING_CLOUD_KUBERNETES_SECRETS_ENABLE_API", "false"),
            ("SPRING_CLOUD_KUBERNETES_SECRETS_PATHS", "/workspace/runtime/secrets"),
        ],
    );
    for name in [
        "KUBERNETES_NAMESPACE",
        "SPRING_CLOUD_DATAFLOW_SERVER_URI",
        "SPRING_CLOUD_SKIPPER_CLIENT_SERVER_URI",
    ] {
        assert!(server.env_var(name).is_some(), "{name}");
    }
}

#[tokio::test]
async fn test_monitoring_env_and_config() {
    let values = kafka_values()
        .server_config("foo", "bar")
        .monitoring_grafana(true)
        .monitoring_prometheus_proxy(true);
    let (rendered, yamls) = render_fixture(MONITORING_RENDER, &values).await;

    assert_eq!(
        &yamls[yamls.len() - 2..],
        &[
            "scdf.feature.monitoring.grafana.enabled=true",
            "scdf.feature.monitoring.prometheusRsocketProxy.enabled=true",
        ]
    );

    let monitoring_env = [
        ("MANAGEMENT_PROMETHEUS_METRICS_EXPORT_ENABLED", "true"),
        ("MANAGEMENT_PROMETHEUS_METRICS_EXPORT_RSOCKET_ENABLED", "true"),
    ];
    assert_env(&rendered.server_container().unwrap().unwrap(), &monitoring_env);
    assert_env(&rendered.skipper_container().unwrap().unwrap(), &monitoring_env);

    let server_config = rendered.server_application_config().unwrap().unwrap();
    let skipper_config = rendered.skipper_application_config().unwrap().unwrap();
    for config in [&server_config, &skipper_config] {
        assert_eq!(
            config
                .get("management.prometheus.metrics.export.enabled")
                .and_then(|v| v.as_bool()),
            Some(true)
        );
    }
    assert!(server_config
        .get("spring.cloud.dataflow.metrics.dashboard.url")
        .is_none());
}

#[tokio::test]
async fn test_metrics_dashboard_url() {
    let values = DataValues::required()
        .monitoring_grafana(true)
        .monitoring_prometheus_proxy(true)
        .metrics_dashboard_url("http://fakedashboard");
    let (rendered, yamls) = render_fixture(DASHBOARD_RENDER, &values).await;

    assert_eq!(
        yamls.last().map(String::as_str),
        Some("scdf.server.metrics.dashboard.url=http://fakedashboard")
    );
    assert_eq!(
        rendered
            .application_config_value(
                SCDF_SERVER_NAME,
                "spring.cloud.dataflow.metrics.dashboard.url"
            )
            .unwrap()
            .as_deref(),
        Some("http://fakedashboard")
    );
}

#[tokio::test]
async fn test_extra_container_env() {
    let values = DataValues::required()
        .server_env(&[("JAVA_TOOL_OPTIONS", SERVER_DEBUG_OPTS)])
        .skipper_env(&[("JAVA_TOOL_OPTIONS", SKIPPER_DEBUG_OPTS)]);
    let (rendered, yamls) = render_fixture(EXTRA_ENV_RENDER, &values).await;

    assert!(yamls[3].starts_with(r#"scdf.server.env=[{"name":"JAVA_TOOL_OPTIONS","#));
    assert!(yamls[4].starts_with(r#"scdf.skipper.env=[{"name":"JAVA_TOOL_OPTIONS","#));

    assert_env(
        &rendered.server_container().unwrap().unwrap(),
        &[("JAVA_TOOL_OPTIONS", SERVER_DEBUG_OPTS)],
    );
    assert_env(
        &rendered.skipper_container().unwrap().unwrap(),
        &[("JAVA_TOOL_OPTIONS", SKIPPER_DEBUG_OPTS)],
    );
}

#[test]
fn test_default_context_path() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);

    let config = rendered.server_application_config().unwrap().unwrap();
    assert!(config.get("server.servlet.context-path").is_none());

    let server = rendered.server_container().unwrap().unwrap();
    let readiness = server.readiness_probe.as_ref().unwrap();
    assert_eq!(
        readiness.http_get.as_ref().and_then(|h| h.path.as_deref()),
        Some("/management/info")
    );
}

#[tokio::test]
async fn test_changed_context_path() {
    let values = DataValues::required().server_context_path("/scdf");
    let (rendered, yamls) = render_fixture(CONTEXT_PATH_RENDER, &values).await;

    assert_eq!(yamls[3], "scdf.server.contextPath=/scdf");
    assert_eq!(
        rendered
            .application_config_value(SCDF_SERVER_NAME, "server.servlet.context-path")
            .unwrap()
            .as_deref(),
        Some("/scdf")
    );

    let server = rendered.server_container().unwrap().unwrap();
    for (probe, path) in [
        (&server.liveness_probe, "/scdf/management/health"),
        (&server.readiness_probe, "/scdf/management/info"),
    ] {
        assert_eq!(
            probe
                .as_ref()
                .and_then(|p| p.http_get.as_ref())
                .and_then(|h| h.path.as_deref()),
            Some(path)
        );
    }
}

#[test]
fn test_default_resources() {
    let rendered = RenderedPackage::new(DEFAULT_RENDER);

    assert_resources(&rendered.server_container().unwrap().unwrap(), "500m", "1024Mi", false);
    assert_resources(&rendered.skipper_container().unwrap().unwrap(), "500m", "1024Mi", false);
}

#[tokio::test]
async fn test_changed_resources() {
    let mut values = DataValues::required();
    for section in ["limits", "requests"] {
        values = values
            .server_resource(section, "cpu", "600m")
            .server_resource(section, "memory", "1000Mi")
            .skipper_resource(section, "cpu", "600m")
            .skipper_resource(section, "memory", "1000Mi");
    }
    let (rendered, yamls) = render_fixture(RESOURCES_RENDER, &values).await;

    assert_eq!(yamls.len(), 11);
    assert!(yamls.contains(&"scdf.skipper.resources.limits.memory=1000Mi".to_string()));

    assert_resources(&rendered.server_container().unwrap().unwrap(), "600m", "1000Mi", true);
    assert_resources(&rendered.skipper_container().unwrap().unwrap(), "600m", "1000Mi", true);
}
