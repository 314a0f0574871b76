/// Delivery counters for periodic monitoring
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub via_webhook: u64,
    pub failed: u64,
    pub skipped_not_ready: u64,
}

impl DeliveryStats {
    pub fn attempted(&self) -> u64 {
        self.delivered + self.failed
    }

    /// Percentage of attempted deliveries that succeeded
    pub fn success_rate(&self) -> u32 {
        let attempted = self.attempted();
        if attempted > 0 {
            (self.delivered as f32 / attempted as f32 * 100.0) as u32
        } else {
            0
        }
    }
}
