// Logging facade used across the crate: `debug!`, `info!`, `warn!`, `error!`.
// The backend (`tracing`, `log` or nothing) is picked by cargo features.

#[allow(unused_imports)]
pub(crate) use crate::observability::{
    log_debug as debug, log_error as error, log_info as info, log_warn as warn,
};
