// ABOUTME: Built-in files of the default profile.
// ABOUTME: The compose file reads image references and profile name from the environment.

pub(super) const SNAPSHOT_COMPOSE: &str = r#"version: "3.7"
services:
  elasticsearch:
    image: "${ELASTICSEARCH_IMAGE_REF}"
    healthcheck:
      test: ["CMD-SHELL", "curl -s --cacert /usr/share/elasticsearch/config/certs/ca-cert.pem -f https://localhost:9200 || exit 1"]
      retries: 300
      interval: 1s
    environment:
      - "ES_JAVA_OPTS=-Xms1g -Xmx1g"
      - "ELASTIC_PASSWORD=changeme"
      - "discovery.type=single-node"
    ports:
      - "127.0.0.1:9200:9200"

  kibana:
    image: "${KIBANA_IMAGE_REF}"
    depends_on:
      - elasticsearch
    healthcheck:
      test: "curl -s -f http://127.0.0.1:5601/login | grep kbn-injected-metadata 2>&1 >/dev/null"
      retries: 600
      interval: 1s
    environment:
      - "ELASTICSEARCH_HOSTS=http://elasticsearch:9200"
    ports:
      - "127.0.0.1:5601:5601"

  package-registry:
    build:
      context: .
      dockerfile: Dockerfile.package-registry
    image: "elastic-package-registry-${PROFILE_NAME}:latest"
    healthcheck:
      test: ["CMD", "curl", "-f", "http://127.0.0.1:8080"]
      retries: 300
      interval: 1s
    volumes:
      - "../../stack/development:/packages/development:ro"
    ports:
      - "127.0.0.1:8080:8080"

  fleet-server:
    image: "${ELASTIC_AGENT_IMAGE_REF}"
    depends_on:
      - elasticsearch
      - kibana
    environment:
      - "FLEET_SERVER_ENABLE=1"
      - "FLEET_SERVER_ELASTICSEARCH_HOST=http://elasticsearch:9200"
      - "KIBANA_FLEET_SETUP=1"
      - "KIBANA_FLEET_HOST=http://kibana:5601"
    ports:
      - "127.0.0.1:8220:8220"

  elastic-agent:
    image: "${ELASTIC_AGENT_IMAGE_REF}"
    depends_on:
      - fleet-server
    environment:
      - "FLEET_ENROLL=1"
      - "FLEET_URL=http://fleet-server:8220"
"#;

pub(super) const PACKAGE_REGISTRY_DOCKERFILE: &str = r#"FROM docker.elastic.co/package-registry/distribution:snapshot
HEALTHCHECK --interval=1s --retries=30 CMD curl -f http://localhost:8080
"#;
