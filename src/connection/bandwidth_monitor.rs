use crate::connection::transport::Transport;

/// Gates optional sync traffic on recent outbound byte volume. The mandatory
/// unit channel is never gated; everything else asks `may_send` first, and
/// asks again per channel since each prior send consumes budget.
pub struct BandwidthMonitor {
    ceiling: usize,
}

impl BandwidthMonitor {
    pub fn new(ceiling: usize) -> Self {
        Self { ceiling }
    }

    /// Whether recent outbound traffic is still below the ceiling.
    pub fn may_send(&self, transport: &dyn Transport) -> bool {
        transport.recent_bytes_sent() < self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::transport::Recipient;

    struct FixedTransport {
        sent: usize,
    }

    impl Transport for FixedTransport {
        fn send(&mut self, _to: Recipient, payload: Vec<u8>) {
            self.sent += payload.len();
        }

        fn recent_bytes_sent(&self) -> usize {
            self.sent
        }
    }

    #[test]
    fn gates_on_ceiling() {
        let monitor = BandwidthMonitor::new(100);

        let mut transport = FixedTransport { sent: 0 };
        assert!(monitor.may_send(&transport));

        transport.sent = 99;
        assert!(monitor.may_send(&transport));

        transport.sent = 100;
        assert!(!monitor.may_send(&transport));
    }
}
