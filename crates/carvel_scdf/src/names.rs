//! Well-known resource names and data-value keys of the package.

/// Data Flow server Deployment, Service and ConfigMap.
pub const SCDF_SERVER_NAME: &str = "scdf-server";
/// Skipper Deployment, Service and ConfigMap.
pub const SKIPPER_NAME: &str = "skipper";
/// In-cluster RabbitMQ broker, absent when an external one is configured.
pub const RABBITMQ_NAME: &str = "rabbitmq";
pub const KAFKA_BROKER_NAME: &str = "kafka-broker";
pub const KAFKA_ZK_NAME: &str = "kafka-zk";
/// Registry credentials Secret generated when no secret ref is given.
pub const DEFAULT_REGISTRY_SECRET: &str = "reg-creds";

/// ConfigMap entry holding the Spring Boot configuration.
pub const APPLICATION_CONFIG_KEY: &str = "application.yaml";

/// Path of the environment table Skipper passes to deployed apps.
pub const SKIPPER_PLATFORM_ENV_PATH: &str =
    "spring.cloud.skipper.server.platform.kubernetes.accounts.default.environmentVariables";

/// Path of the pull secret the server hands to launched tasks.
pub const SERVER_TASK_PULL_SECRET_PATH: &str =
    "spring.cloud.dataflow.task.platform.kubernetes.accounts.default.imagePullSecret";

/// Path of the pull secret Skipper hands to deployed streams.
pub const SKIPPER_PULL_SECRET_PATH: &str =
    "spring.cloud.skipper.server.platform.kubernetes.accounts.default.imagePullSecret";

/// Environment variable naming the package config directory.
pub const CONFIG_DIR_ENV: &str = "SCDF_CARVEL_CONFIG";
pub const DEFAULT_CONFIG_DIR: &str = "config";

pub const SERVER_IMAGE_TAG: &str = "scdf.server.image.tag";
pub const SKIPPER_IMAGE_TAG: &str = "scdf.skipper.image.tag";
pub const CTR_IMAGE_TAG: &str = "scdf.ctr.image.tag";

/// Versions the package refuses to render without.
pub const DEFAULT_REQUIRED_DATA_VALUES: &[(&str, &str)] = &[
    (SERVER_IMAGE_TAG, "2.8.1"),
    (SKIPPER_IMAGE_TAG, "2.7.1"),
    (CTR_IMAGE_TAG, "2.8.1"),
];

/// Rabbit connection keys in the Skipper platform environment.
pub const RABBIT_ENV_HOST: &str = "SPRING_RABBITMQ_HOST";
pub const RABBIT_ENV_PORT: &str = "SPRING_RABBITMQ_PORT";
pub const RABBIT_ENV_USERNAME: &str = "SPRING_RABBITMQ_USERNAME";
pub const RABBIT_ENV_PASSWORD: &str = "SPRING_RABBITMQ_PASSWORD";
