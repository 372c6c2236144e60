//! Defaults and shared constants.

/// Python version used when a rule does not name one.
pub const PYTHON_VERSION_DEFAULT: &str = "3.11";

/// Base image used by `base()` when no image is given.
pub const DEFAULT_BASE_IMAGE: &str = "ubuntu:22.04";

/// Login shell for a fresh graph.
pub const DEFAULT_SHELL: &str = "bash";

/// Jupyter port used by `config.jupyter()` when no port is given.
pub const DEFAULT_JUPYTER_PORT: i64 = 8888;

/// Default CRAN mirror for `config.cran_mirror()`.
pub const DEFAULT_CRAN_MIRROR: &str = "https://cloud.r-project.org";

/// Listening address used by `runtime.expose()` when none is given.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1";

/// Length of the truncated hex hash identifying a graph.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;
