//! System-wide constants and default names.

/// Id of the event dispatcher definition. Without it, no listener is reported.
pub const EVENT_DISPATCHER_ID: &str = "event_dispatcher";

/// Id under which the graph registers itself as a raw instance.
pub const SERVICE_CONTAINER_ID: &str = "service_container";

/// Literal suffix a tag name must carry to declare an event listener.
pub const EVENT_LISTENER_TAG_SUFFIX: &str = ".event_listener";

/// Scope assigned to definitions that do not declare one.
pub const DEFAULT_SCOPE: &str = "container";

/// Default kernel name, used as the container class prefix.
pub const DEFAULT_KERNEL_NAME: &str = "app";

/// Default kernel environment.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Environment in which debug mode is off unless requested explicitly.
pub const PRODUCTION_ENVIRONMENT: &str = "prod";

/// Cache directory, relative to the project root, holding one folder per environment.
pub const DEFAULT_CACHE_ROOT: &str = "var/cache";

/// Suffix of the compiled container class name.
pub const CONTAINER_CLASS_SUFFIX: &str = "ProjectContainer";

/// Dump file extensions probed, in order, when locating the cache artifact.
pub const DUMP_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Name of the listener debug command.
pub const LISTENERS_COMMAND: &str = "container:debug:listeners";

/// Section name printed in front of every report heading.
pub const REPORT_SECTION: &str = "container";
