#![allow(dead_code)]

pub mod logging {
    use std::io;
    use std::sync::{Arc, Mutex, Once};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    /// Install a global fmt subscriber once per test binary.
    ///
    /// Honors `RUST_LOG`; output goes through the test harness writer so it is
    /// only shown for failing tests.
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_test_writer()
                .try_init();
        });
    }

    /// In-memory log sink for asserting on emitted events
    #[derive(Clone, Default)]
    pub struct CapturedLogs {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
        }
    }

    pub struct CapturedWriter {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl io::Write for CapturedWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedWriter;

        fn make_writer(&'a self) -> Self::Writer {
            CapturedWriter {
                buf: Arc::clone(&self.buf),
            }
        }
    }

    /// Run `f` with a thread-local subscriber writing to the returned sink.
    pub fn capture<F: FnOnce()>(level: &str, f: F) -> CapturedLogs {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(level))
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs
    }
}
