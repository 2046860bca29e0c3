//! Schema node names of the `ietf-netconf-server` configuration module and
//! the keystore fragments the credential provider reads.

/// Top-level node of the server configuration.
pub const NETCONF_SERVER: &str = "ietf-netconf-server:netconf-server";

/// Absolute path of the server configuration root.
pub const NETCONF_SERVER_PATH: &str = "/ietf-netconf-server:netconf-server";

pub const LISTEN: &str = "listen";
pub const CALL_HOME: &str = "call-home";
pub const ENDPOINT: &str = "endpoint";
pub const ENDPOINTS: &str = "endpoints";
pub const NETCONF_CLIENT: &str = "netconf-client";
pub const NAME: &str = "name";
pub const IDLE_TIMEOUT: &str = "idle-timeout";

pub const SSH: &str = "ssh";
pub const TCP_SERVER_PARAMETERS: &str = "tcp-server-parameters";
pub const TCP_CLIENT_PARAMETERS: &str = "tcp-client-parameters";
pub const SSH_SERVER_PARAMETERS: &str = "ssh-server-parameters";

pub const LOCAL_ADDRESS: &str = "local-address";
pub const LOCAL_PORT: &str = "local-port";
pub const REMOTE_ADDRESS: &str = "remote-address";
pub const REMOTE_PORT: &str = "remote-port";

pub const KEEPALIVES: &str = "keepalives";
pub const IDLE_TIME: &str = "idle-time";
pub const MAX_PROBES: &str = "max-probes";
pub const PROBE_INTERVAL: &str = "probe-interval";

pub const SERVER_IDENTITY: &str = "server-identity";
pub const HOST_KEY: &str = "host-key";
pub const PUBLIC_KEY: &str = "public-key";
pub const LOCAL_DEFINITION: &str = "local-definition";
pub const ALGORITHM: &str = "algorithm";
pub const PRIVATE_KEY: &str = "private-key";

pub const CLIENT_AUTHENTICATION: &str = "client-authentication";
pub const SUPPORTED_AUTHENTICATION_METHODS: &str = "supported-authentication-methods";
pub const PUBLICKEY: &str = "publickey";
pub const PASSWORD: &str = "password";
/// Leaf name the password toggle matches by default (note the extra `s`).
/// The real `password` leaf toggles only with `honor_password_leaf`.
pub const PASSSWORD: &str = "passsword";
pub const HOSTBASED: &str = "hostbased";
pub const NONE: &str = "none";
pub const OTHER: &str = "other";
pub const INTERACTIVE: &str = "interactive";

pub const MAX_WAIT: &str = "max-wait";
pub const MAX_ATTEMPTS: &str = "max-attempts";

pub const CONNECTION_TYPE: &str = "connection-type";
pub const PERSISTENT: &str = "persistent";
pub const PERIODIC: &str = "periodic";
pub const PERIOD: &str = "period";
pub const ANCHOR_TIME: &str = "anchor-time";

pub const RECONNECT_STRATEGY: &str = "reconnect-strategy";
pub const START_WITH: &str = "start-with";
