// tests/support/mocks/delivery.rs
use async_trait::async_trait;
use lms_core::application::{
    ApplicationResult, error::ApplicationError, ports::delivery::NotificationSender,
};
use lms_core::domain::notification::{DeliveryChannel, Notification};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Notify;
use uuid::Uuid;

/// 送信された通知 ID を記録するだけの送信者
pub struct RecordingSender {
    channel: DeliveryChannel,
    sent: Mutex<Vec<Uuid>>,
}

impl RecordingSender {
    pub fn new(channel: DeliveryChannel) -> Self {
        Self {
            channel,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Uuid> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    fn channel(&self) -> DeliveryChannel {
        self.channel
    }

    async fn send(&self, notification: &Notification) -> ApplicationResult<()> {
        self.sent.lock().unwrap().push(notification.id);
        Ok(())
    }
}

/// 最初の `failures` 回だけ失敗する送信者（`u32::MAX` で常に失敗）
pub struct FlakySender {
    channel: DeliveryChannel,
    failures: u32,
    attempts: AtomicU32,
}

impl FlakySender {
    pub fn new(channel: DeliveryChannel, failures: u32) -> Self {
        Self {
            channel,
            failures,
            attempts: AtomicU32::new(0),
        }
    }

    pub fn always_failing(channel: DeliveryChannel) -> Self {
        Self::new(channel, u32::MAX)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSender for FlakySender {
    fn channel(&self) -> DeliveryChannel {
        self.channel
    }

    async fn send(&self, _: &Notification) -> ApplicationResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            Err(ApplicationError::external(
                self.channel.as_str(),
                format!("gateway timeout on attempt {attempt}"),
            ))
        } else {
            Ok(())
        }
    }
}

/// 最初の送信だけ `release` まで待機する送信者（並行実行の再現用）
pub struct GatedSender {
    channel: DeliveryChannel,
    calls: AtomicU32,
    entered: Notify,
    release: Notify,
}

impl GatedSender {
    pub fn new(channel: DeliveryChannel) -> Self {
        Self {
            channel,
            calls: AtomicU32::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    /// 最初の送信が開始されるまで待つ
    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSender for GatedSender {
    fn channel(&self) -> DeliveryChannel {
        self.channel
    }

    async fn send(&self, _: &Notification) -> ApplicationResult<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(())
    }
}
