//! The gateway session: liveness tracking, the background keepalive loop,
//! and the RPC-backed command surface.
//!
//! One mutex guards the RPC client, the liveness timestamp, and the cached
//! snapshots, so remote calls are strictly serialized per device: no command
//! ever runs without a liveness check immediately preceding it under the
//! same lock. The `running` flag is an atomic on the side — [`Device::stop`]
//! must stay safe to call from a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use serde::de::DeserializeOwned;
use serde_json::Value;

use smsgate_core::{
    DeleteScope, OutgoingSms, SendReport, SendStatus, SmsContactList, SmsContentList,
    SmsStorageState, SystemInfo, SystemStatus,
};
use smsgate_rpc::{
    HttpTransport, RpcClient, RpcError, Transport, INTERNAL_ERROR, INVALID_ERROR_OBJECT,
};

use crate::config::{ConfigError, DeviceConfig};
use crate::error::DeviceError;

const HEARTBEAT: &str = "HeartBeat";
const SEND_POLL_INTERVAL: Duration = Duration::from_secs(1);

struct SessionState {
    rpc: RpcClient,
    /// Last successful contact; `None` until the first one, so the very
    /// first liveness check always probes.
    last_alive: Option<Instant>,
    snapshots: Snapshots,
}

#[derive(Default)]
struct Snapshots {
    system_info: Option<SystemInfo>,
    system_status: Option<SystemStatus>,
    connection_state: Option<smsgate_core::ConnectionState>,
    sms_storage: Option<SmsStorageState>,
    contacts: Option<SmsContactList>,
    messages: Option<SmsContentList>,
}

/// One gateway session. Share across threads with `Arc`; every operation
/// takes the internal lock for its whole duration.
pub struct Device {
    state: Mutex<SessionState>,
    running: AtomicBool,
    timeout: Duration,
    keepalive: Duration,
    poll_interval: Duration,
}

impl Device {
    /// Build a device over the real HTTP transport. Fails fast on an invalid
    /// keepalive/timeout combination.
    pub fn connect(config: DeviceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = HttpTransport::new(
            &config.host,
            config.port,
            &config.base_path,
            config.timeout,
            config.headers.clone(),
        );
        Ok(Self::with_transport(
            Box::new(transport),
            config.timeout,
            config.keepalive,
        ))
    }

    /// Build a device over an arbitrary transport. Tests script probe
    /// outcomes and observe request ordering through this.
    pub fn with_transport(
        transport: Box<dyn Transport>,
        timeout: Duration,
        keepalive: Duration,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState {
                rpc: RpcClient::new(transport),
                last_alive: None,
                snapshots: Snapshots::default(),
            }),
            running: AtomicBool::new(false),
            timeout,
            keepalive,
            poll_interval: SEND_POLL_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ----------------------------------------------------------------------
    // Liveness
    // ----------------------------------------------------------------------

    /// Probe the device with a heartbeat. A connectivity failure means "not
    /// alive" and leaves the freshness timestamp untouched; any other RPC
    /// failure is fatal for the caller.
    fn ensure_alive_locked(&self, state: &mut SessionState) -> Result<bool, DeviceError> {
        match state.rpc.call(HEARTBEAT, None) {
            Ok(_) => {
                state.last_alive = Some(Instant::now());
                Ok(true)
            }
            Err(err) if err.is_offline() => {
                tracing::debug!(error = %err, "heartbeat failed; device offline");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Cheap path first: within the freshness window no RPC happens at all.
    fn is_alive_locked(&self, state: &mut SessionState) -> Result<bool, DeviceError> {
        let fresh = state
            .last_alive
            .is_some_and(|at| at.elapsed() <= self.timeout);
        if fresh {
            Ok(true)
        } else {
            self.ensure_alive_locked(state)
        }
    }

    /// Whether the device is currently believed reachable; probes only when
    /// the last successful contact is older than the freshness window.
    pub fn is_alive(&self) -> Result<bool, DeviceError> {
        let mut state = self.lock();
        self.is_alive_locked(&mut state)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request the keepalive loop (and any blocked [`Device::wait_alive`]) to
    /// exit. Only flips an atomic flag — no I/O, no locking — so it is safe
    /// to call from a signal-handling context. Idempotent.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Background keepalive loop. Blocks the calling thread until stopped,
    /// until a failed probe's `on_dead` callback declines to continue, or
    /// until a probe fails with a non-connectivity error.
    ///
    /// `on_dead` runs on this thread with the session lock released, so it
    /// may call [`Device::wait_alive`] and pause/resume a watcher. It is the
    /// sole authority on whether repeated unreachability ends the loop.
    pub fn run_keepalive<F>(&self, mut on_dead: F) -> Result<(), DeviceError>
    where
        F: FnMut(&Device) -> bool,
    {
        self.running.store(true, Ordering::SeqCst);
        tracing::debug!("keepalive loop started");
        let result = loop {
            thread::sleep(self.keepalive);
            let probe = {
                let mut state = self.lock();
                self.ensure_alive_locked(&mut state)
            };
            match probe {
                Ok(true) => {
                    if !self.is_running() {
                        break Ok(());
                    }
                }
                Ok(false) => {
                    if !on_dead(self) {
                        self.running.store(false, Ordering::SeqCst);
                        break Ok(());
                    }
                }
                Err(err) => {
                    self.running.store(false, Ordering::SeqCst);
                    break Err(err);
                }
            }
        };
        tracing::debug!("keepalive loop stopped");
        result
    }

    /// Block until the device answers a probe or the coordinator has been
    /// stopped. Each probe holds the lock only for its own round trip; the
    /// sleeps in between run unlocked.
    pub fn wait_alive(&self) -> Result<(), DeviceError> {
        loop {
            let alive = {
                let mut state = self.lock();
                self.is_alive_locked(&mut state)?
            };
            if alive || !self.is_running() {
                return Ok(());
            }
            thread::sleep(self.keepalive);
        }
    }

    // ----------------------------------------------------------------------
    // Command surface
    // ----------------------------------------------------------------------

    /// Call `method`, decode the result, and refresh the freshness timestamp
    /// (a successful command is as good as a probe).
    fn fetch<T: DeserializeOwned>(
        state: &mut SessionState,
        method: &'static str,
        params: Option<Value>,
    ) -> Result<T, DeviceError> {
        let result = state.rpc.call(method, params)?;
        let decoded =
            serde_json::from_value(result).map_err(|source| DeviceError::Decode { method, source })?;
        state.last_alive = Some(Instant::now());
        Ok(decoded)
    }

    /// System information; the cached snapshot when the device is offline
    /// (`None` if it was never reachable).
    pub fn system_info(&self) -> Result<Option<SystemInfo>, DeviceError> {
        let mut state = self.lock();
        if self.is_alive_locked(&mut state)? {
            let info = Self::fetch(&mut state, SystemInfo::QUERY, None)?;
            state.snapshots.system_info = Some(info);
        }
        Ok(state.snapshots.system_info.clone())
    }

    /// Radio network status.
    pub fn system_status(&self) -> Result<Option<SystemStatus>, DeviceError> {
        let mut state = self.lock();
        if self.is_alive_locked(&mut state)? {
            let status = Self::fetch(&mut state, SystemStatus::QUERY, None)?;
            state.snapshots.system_status = Some(status);
        }
        Ok(state.snapshots.system_status.clone())
    }

    /// WAN connection state.
    pub fn connection_state(&self) -> Result<Option<smsgate_core::ConnectionState>, DeviceError> {
        let mut state = self.lock();
        if self.is_alive_locked(&mut state)? {
            let connection = Self::fetch(&mut state, smsgate_core::ConnectionState::QUERY, None)?;
            state.snapshots.connection_state = Some(connection);
        }
        Ok(state.snapshots.connection_state.clone())
    }

    /// SMS storage counters.
    pub fn sms_storage_state(&self) -> Result<Option<SmsStorageState>, DeviceError> {
        let mut state = self.lock();
        if self.is_alive_locked(&mut state)? {
            let storage = Self::fetch(&mut state, SmsStorageState::QUERY, None)?;
            state.snapshots.sms_storage = Some(storage);
        }
        Ok(state.snapshots.sms_storage.clone())
    }

    /// Contact threads for a 1-based page.
    pub fn sms_contacts(&self, page: u64) -> Result<Option<SmsContactList>, DeviceError> {
        let mut state = self.lock();
        if self.is_alive_locked(&mut state)? {
            let params = SmsContactList::page_params(page.saturating_sub(1));
            let contacts = Self::fetch(&mut state, SmsContactList::QUERY, Some(params))?;
            state.snapshots.contacts = Some(contacts);
        }
        Ok(state.snapshots.contacts.clone())
    }

    /// Messages exchanged with `contact`, 1-based page.
    pub fn sms_contents(
        &self,
        contact: i64,
        page: u64,
    ) -> Result<Option<SmsContentList>, DeviceError> {
        let mut state = self.lock();
        if self.is_alive_locked(&mut state)? {
            let params = SmsContentList::params(contact, page.saturating_sub(1));
            let messages = Self::fetch(&mut state, SmsContentList::QUERY, Some(params))?;
            state.snapshots.messages = Some(messages);
        }
        Ok(state.snapshots.messages.clone())
    }

    /// Delete a contact thread or a single message. Returns `false` when the
    /// device was offline and nothing was attempted.
    ///
    /// The firmware reports one specific malformed error object on an
    /// otherwise successful delete; exactly that (code, message) pair counts
    /// as success and every other error propagates.
    pub fn delete_sms(&self, scope: DeleteScope) -> Result<bool, DeviceError> {
        let mut state = self.lock();
        if !self.is_alive_locked(&mut state)? {
            return Ok(false);
        }
        match state.rpc.call(DeleteScope::QUERY, Some(scope.params())) {
            Ok(_) => {
                state.last_alive = Some(Instant::now());
                Ok(true)
            }
            Err(RpcError::Device { code, ref message })
                if code == INTERNAL_ERROR && message == INVALID_ERROR_OBJECT =>
            {
                tracing::debug!("tolerating firmware delete quirk");
                state.last_alive = Some(Instant::now());
                Ok(true)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Submit an SMS and poll the firmware until the send reaches a terminal
    /// status. An offline device yields [`SendStatus::Failed`] without any
    /// remote call.
    ///
    /// The poll loop is unbounded, matching the device's observed behavior;
    /// the lock is released across each poll sleep so the keepalive loop and
    /// other callers keep making progress.
    pub fn send_sms(&self, sms: &OutgoingSms) -> Result<SendStatus, DeviceError> {
        let mut status = {
            let mut state = self.lock();
            if !self.is_alive_locked(&mut state)? {
                return Ok(SendStatus::Failed);
            }
            let queued_at = Local::now().naive_local();
            state.rpc.call(OutgoingSms::SUBMIT, Some(sms.params(queued_at)))?;
            state.last_alive = Some(Instant::now());
            Self::fetch::<SendReport>(&mut state, SendReport::QUERY, None)?.status
        };
        while status == SendStatus::Sending {
            thread::sleep(self.poll_interval);
            let mut state = self.lock();
            status = Self::fetch::<SendReport>(&mut state, SendReport::QUERY, None)?.status;
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use smsgate_rpc::TransportError;

    const TICK: Duration = Duration::from_millis(10);
    const WINDOW: Duration = Duration::from_millis(500);

    // ─── Scripted transport ────────────────────────────────────────────────

    enum Reply {
        Result(Value),
        Offline,
        AppError { code: i64, message: &'static str },
    }

    #[derive(Clone)]
    struct ScriptTransport(Arc<ScriptInner>);

    struct ScriptInner {
        replies: Mutex<VecDeque<Reply>>,
        methods: Mutex<Vec<String>>,
    }

    impl ScriptTransport {
        fn new(replies: Vec<Reply>) -> Self {
            Self(Arc::new(ScriptInner {
                replies: Mutex::new(replies.into()),
                methods: Mutex::new(Vec::new()),
            }))
        }

        fn methods(&self) -> Vec<String> {
            self.0.methods.lock().unwrap().clone()
        }

        fn device(&self) -> Device {
            Device::with_transport(Box::new(self.clone()), WINDOW, TICK)
        }
    }

    impl Transport for ScriptTransport {
        fn roundtrip(&self, request: &Value) -> Result<String, TransportError> {
            let method = request["method"].as_str().unwrap_or_default().to_string();
            self.0.methods.lock().unwrap().push(method);
            let reply = self
                .0
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra rpc call");
            match reply {
                Reply::Result(value) => Ok(json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "result": value,
                })
                .to_string()),
                Reply::Offline => Err(TransportError::Unreachable("connection refused".into())),
                Reply::AppError { code, message } => Ok(json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "error": { "code": code, "message": message },
                })
                .to_string()),
            }
        }
    }

    // ─── Switchable transport for the threaded tests ───────────────────────

    #[derive(Clone)]
    struct SwitchTransport(Arc<SwitchInner>);

    struct SwitchInner {
        online: AtomicBool,
        probes: AtomicUsize,
        in_flight: AtomicBool,
        overlapped: AtomicBool,
    }

    impl SwitchTransport {
        fn new(online: bool) -> Self {
            Self(Arc::new(SwitchInner {
                online: AtomicBool::new(online),
                probes: AtomicUsize::new(0),
                in_flight: AtomicBool::new(false),
                overlapped: AtomicBool::new(false),
            }))
        }

        fn set_online(&self, online: bool) {
            self.0.online.store(online, Ordering::SeqCst);
        }

        fn probes(&self) -> usize {
            self.0.probes.load(Ordering::SeqCst)
        }

        fn overlapped(&self) -> bool {
            self.0.overlapped.load(Ordering::SeqCst)
        }

        fn device(&self) -> Device {
            Device::with_transport(Box::new(self.clone()), WINDOW, TICK)
        }
    }

    impl Transport for SwitchTransport {
        fn roundtrip(&self, request: &Value) -> Result<String, TransportError> {
            if self.0.in_flight.swap(true, Ordering::SeqCst) {
                self.0.overlapped.store(true, Ordering::SeqCst);
            }
            self.0.probes.fetch_add(1, Ordering::SeqCst);
            // Widen the race window so interleaved requests would be caught.
            thread::sleep(Duration::from_millis(2));

            let method = request["method"].as_str().unwrap_or_default();
            let result = if method == SmsStorageState::QUERY {
                storage_payload()
            } else {
                Value::Null
            };
            let reply = if self.0.online.load(Ordering::SeqCst) {
                Ok(json!({ "jsonrpc": "2.0", "id": request["id"], "result": result }).to_string())
            } else {
                Err(TransportError::Unreachable("connection refused".into()))
            };
            self.0.in_flight.store(false, Ordering::SeqCst);
            reply
        }
    }

    fn storage_payload() -> Value {
        json!({
            "UnreadReport": 0,
            "LeftCount": 90,
            "MaxCount": 100,
            "TUseCount": 10,
            "UnreadSMSCount": 2,
        })
    }

    // ─── Liveness tracker ──────────────────────────────────────────────────

    #[test]
    fn first_liveness_check_probes_exactly_once() {
        let transport = ScriptTransport::new(vec![Reply::Result(Value::Null)]);
        let device = transport.device();
        assert!(device.is_alive().expect("probe"));
        assert_eq!(transport.methods(), vec![HEARTBEAT]);
    }

    #[test]
    fn fresh_liveness_skips_the_probe() {
        let transport = ScriptTransport::new(vec![Reply::Result(Value::Null)]);
        let device = transport.device();
        assert!(device.is_alive().expect("probe"));
        // Within the freshness window: no further transport traffic.
        assert!(device.is_alive().expect("fresh"));
        assert!(device.is_alive().expect("fresh"));
        assert_eq!(transport.methods().len(), 1);
    }

    #[test]
    fn failed_probe_does_not_refresh_liveness() {
        let transport = ScriptTransport::new(vec![Reply::Offline, Reply::Offline]);
        let device = transport.device();
        assert!(!device.is_alive().expect("offline probe"));
        // Still stale, so the next check probes again.
        assert!(!device.is_alive().expect("offline probe"));
        assert_eq!(transport.methods().len(), 2);
    }

    #[test]
    fn non_connectivity_probe_failure_is_fatal() {
        let transport = ScriptTransport::new(vec![Reply::AppError {
            code: -32001,
            message: "boom",
        }]);
        let device = transport.device();
        let err = device.is_alive().expect_err("application error");
        assert!(matches!(
            err,
            DeviceError::Rpc(RpcError::Device { code: -32001, .. })
        ));
    }

    #[test]
    fn successful_command_counts_as_liveness_contact() {
        let transport = ScriptTransport::new(vec![
            Reply::Result(Value::Null),
            Reply::Result(storage_payload()),
        ]);
        let device = transport.device();
        let storage = device
            .sms_storage_state()
            .expect("storage query")
            .expect("snapshot present");
        assert_eq!(storage.unread_count, 2);
        // The fetch refreshed the window; no new probe needed.
        assert!(device.is_alive().expect("fresh"));
        assert_eq!(
            transport.methods(),
            vec![HEARTBEAT, SmsStorageState::QUERY]
        );
    }

    #[test]
    fn offline_read_returns_cached_snapshot_unchanged() {
        let transport = SwitchTransport::new(true);
        let device =
            Device::with_transport(Box::new(transport.clone()), Duration::from_millis(20), TICK);
        let first = device
            .sms_storage_state()
            .expect("online")
            .expect("snapshot");

        transport.set_online(false);
        thread::sleep(Duration::from_millis(30)); // let the freshness window lapse
        let second = device.sms_storage_state().expect("offline");
        assert_eq!(second, Some(first));
    }

    #[test]
    fn offline_read_with_no_cache_returns_none() {
        let transport = ScriptTransport::new(vec![Reply::Offline]);
        let device = transport.device();
        assert_eq!(device.sms_storage_state().expect("offline"), None);
    }

    // ─── Keepalive loop ────────────────────────────────────────────────────

    #[test]
    fn stop_is_idempotent_and_ends_the_loop() {
        let transport = SwitchTransport::new(true);
        let device = Arc::new(transport.device());

        let worker = {
            let device = device.clone();
            thread::spawn(move || device.run_keepalive(|_| true))
        };
        thread::sleep(TICK * 3);
        assert!(device.is_running());

        device.stop();
        device.stop();
        worker
            .join()
            .expect("keepalive thread")
            .expect("clean exit");
        assert!(!device.is_running());
    }

    #[test]
    fn keepalive_gives_up_when_the_callback_declines() {
        let transport = SwitchTransport::new(false);
        let device = transport.device();

        let mut deaths = 0;
        device
            .run_keepalive(|_| {
                deaths += 1;
                false
            })
            .expect("clean exit");

        assert_eq!(deaths, 1);
        assert!(!device.is_running());
    }

    #[test]
    fn keepalive_retries_while_the_callback_allows_it() {
        let transport = SwitchTransport::new(false);
        let device = transport.device();

        let mut deaths = 0;
        device
            .run_keepalive(|d| {
                deaths += 1;
                if deaths == 3 {
                    d.stop();
                }
                d.is_running()
            })
            .expect("clean exit");

        assert_eq!(deaths, 3);
        assert!(transport.probes() >= 3);
    }

    #[test]
    fn keepalive_surfaces_fatal_probe_errors() {
        let transport = ScriptTransport::new(vec![Reply::AppError {
            code: -32001,
            message: "boom",
        }]);
        let device = transport.device();
        let err = device.run_keepalive(|_| true).expect_err("fatal probe");
        assert!(matches!(err, DeviceError::Rpc(RpcError::Device { .. })));
        assert!(!device.is_running());
    }

    #[test]
    fn on_dead_blocks_in_wait_alive_until_the_device_returns() {
        let transport = SwitchTransport::new(false);
        let device = Arc::new(transport.device());
        let events = Arc::new(Mutex::new(Vec::<&'static str>::new()));

        let worker = {
            let device = device.clone();
            let events = events.clone();
            thread::spawn(move || {
                device.run_keepalive(|d| {
                    events.lock().unwrap().push("dead");
                    d.wait_alive().expect("wait for device");
                    events.lock().unwrap().push("recovered");
                    d.is_running()
                })
            })
        };

        thread::sleep(TICK * 6);
        {
            let events = events.lock().unwrap();
            assert_eq!(events.first(), Some(&"dead"), "loop must report death");
            assert!(
                !events.contains(&"recovered"),
                "wait_alive must block while offline"
            );
        }

        transport.set_online(true);
        thread::sleep(TICK * 6);
        assert!(
            events.lock().unwrap().contains(&"recovered"),
            "wait_alive must return within a tick of reachability"
        );

        device.stop();
        worker
            .join()
            .expect("keepalive thread")
            .expect("clean exit");
    }

    #[test]
    fn wait_alive_returns_when_stopped_even_while_offline() {
        let transport = SwitchTransport::new(false);
        let device = transport.device();
        // `running` was never set: a single failed probe, then return.
        device.wait_alive().expect("no fatal error");
        assert_eq!(transport.probes(), 1);
    }

    // ─── Serialization of remote calls ─────────────────────────────────────

    #[test]
    fn keepalive_and_foreground_calls_never_interleave() {
        let transport = SwitchTransport::new(true);
        // A tiny freshness window forces the foreground to probe often.
        let device = Arc::new(Device::with_transport(
            Box::new(transport.clone()),
            Duration::from_millis(1),
            Duration::from_millis(3),
        ));

        let worker = {
            let device = device.clone();
            thread::spawn(move || device.run_keepalive(|_| true))
        };

        for _ in 0..25 {
            let storage = device.sms_storage_state().expect("storage query");
            assert!(storage.is_some());
        }

        device.stop();
        worker
            .join()
            .expect("keepalive thread")
            .expect("clean exit");
        assert!(
            !transport.overlapped(),
            "transport observed two in-flight requests"
        );
    }

    // ─── Send/delete sub-protocols ─────────────────────────────────────────

    #[test]
    fn send_polls_status_until_terminal() {
        let sending = json!({ "SendStatus": 1 });
        let success = json!({ "SendStatus": 2 });
        let transport = ScriptTransport::new(vec![
            Reply::Result(Value::Null),
            Reply::Result(Value::Null),
            Reply::Result(sending.clone()),
            Reply::Result(sending),
            Reply::Result(success),
        ]);
        let device = transport
            .device()
            .with_poll_interval(Duration::from_millis(5));

        let sms = OutgoingSms::new(vec!["+3612345678".into()], "hello");
        let status = device.send_sms(&sms).expect("send");
        assert_eq!(status, SendStatus::Success);
        assert_eq!(
            transport.methods(),
            vec![
                HEARTBEAT,
                OutgoingSms::SUBMIT,
                SendReport::QUERY,
                SendReport::QUERY,
                SendReport::QUERY,
            ]
        );
    }

    #[test]
    fn send_with_immediate_terminal_status_does_not_poll() {
        let transport = ScriptTransport::new(vec![
            Reply::Result(Value::Null),
            Reply::Result(Value::Null),
            Reply::Result(json!({ "SendStatus": 4 })),
        ]);
        let device = transport.device();
        let sms = OutgoingSms::new(vec!["+3612345678".into()], "hello");
        assert_eq!(device.send_sms(&sms).expect("send"), SendStatus::Full);
        assert_eq!(transport.methods().len(), 3);
    }

    #[test]
    fn send_while_offline_fails_without_submitting() {
        let transport = ScriptTransport::new(vec![Reply::Offline]);
        let device = transport.device();
        let sms = OutgoingSms::new(vec!["+3612345678".into()], "hello");
        assert_eq!(device.send_sms(&sms).expect("send"), SendStatus::Failed);
        assert_eq!(transport.methods(), vec![HEARTBEAT]);
    }

    #[test]
    fn delete_tolerates_the_firmware_quirk() {
        let transport = ScriptTransport::new(vec![
            Reply::Result(Value::Null),
            Reply::AppError {
                code: INTERNAL_ERROR,
                message: INVALID_ERROR_OBJECT,
            },
        ]);
        let device = transport.device();
        assert!(device
            .delete_sms(DeleteScope::Contact(3))
            .expect("tolerated"));
    }

    #[test]
    fn delete_propagates_every_other_application_error() {
        // Same code, different message.
        let transport = ScriptTransport::new(vec![
            Reply::Result(Value::Null),
            Reply::AppError {
                code: INTERNAL_ERROR,
                message: "some other failure",
            },
        ]);
        let device = transport.device();
        assert!(device.delete_sms(DeleteScope::Contact(3)).is_err());

        // Same message, different code.
        let transport = ScriptTransport::new(vec![
            Reply::Result(Value::Null),
            Reply::AppError {
                code: -1,
                message: INVALID_ERROR_OBJECT,
            },
        ]);
        let device = transport.device();
        assert!(device
            .delete_sms(DeleteScope::Message { contact: 3, sms: 7 })
            .is_err());
    }

    #[test]
    fn delete_while_offline_reports_nothing_deleted() {
        let transport = ScriptTransport::new(vec![Reply::Offline]);
        let device = transport.device();
        assert!(!device
            .delete_sms(DeleteScope::Contact(3))
            .expect("no rpc attempted"));
        assert_eq!(transport.methods(), vec![HEARTBEAT]);
    }
}
