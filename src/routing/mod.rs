//! Log destination resolution and delivery
//!
//! At startup [`LogRouter::unpack_log_config`] resolves each log key (e.g. `mod`,
//! `errors`, or any custom key) to a channel, a webhook, or a webhook posting into
//! a thread. Afterwards the resolved table is read-only and every delivery is
//! isolated: failures are logged and never surface to the caller.
//!
//! Resolution order:
//! - `logChannels` entries, channel and webhook independently
//! - legacy top-level fields for keys not already holding a channel
//! - the home channel for well-known keys with nothing configured

mod channels;
mod destination;
mod dump;
mod resolver;
mod router;
mod stats;
mod webhooks;

pub use channels::ChannelCache;
pub use destination::{Destination, DestinationTable};
pub use dump::{DUMP_FILENAME, DumpComposer};
pub use router::LogRouter;
pub use stats::DeliveryStats;
pub use webhooks::{WebhookCache, parse_webhook_url};
