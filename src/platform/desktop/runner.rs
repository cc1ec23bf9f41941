//! Event-loop driver and launch entry points for the desktop backend.

use super::DesktopBackend;
use crate::app::{App, AppDelegate, QuitDecision, cleanup_launch, prepare_launch};
use crate::window::WindowId;
use anyhow::Result;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};

/// Run a desktop application with the process's command-line arguments.
///
/// Blocks until the event loop exits: `prepare_settings` runs first, then
/// the default window is created, then events are dispatched until a quit
/// attempt passes the veto poll.
pub fn launch<D>(delegate: D) -> Result<()>
where
    D: AppDelegate<DesktopBackend>,
{
    launch_with_args(delegate, std::env::args().collect())
}

/// Like [`launch`], with an explicit argument vector.
pub fn launch_with_args<D>(mut delegate: D, args: Vec<String>) -> Result<()>
where
    D: AppDelegate<DesktopBackend>,
{
    prepare_launch();

    let settings = App::<DesktopBackend>::configure(&mut delegate);
    let event_loop = EventLoop::new()?;
    // Wait by default; about_to_wait switches to WaitUntil/Poll depending
    // on the frame-rate setting.
    event_loop.set_control_flow(ControlFlow::Wait);

    let app = App::new(DesktopBackend::new(), settings, args)?;
    let mut driver = Driver {
        app,
        delegate,
        started: false,
        next_frame: None,
        failure: None,
    };

    let run_result = event_loop.run_app(&mut driver);
    let failure = driver.failure.take();
    // Event loop has exited; drop the instance (frees the liveness latch)
    // before running the cleanup bracket.
    drop(driver);
    cleanup_launch();

    run_result?;
    failure.map_or(Ok(()), Err)
}

struct Driver<D> {
    app: App<DesktopBackend>,
    delegate: D,
    started: bool,
    next_frame: Option<Instant>,
    failure: Option<anyhow::Error>,
}

impl<D> Driver<D>
where
    D: AppDelegate<DesktopBackend>,
{
    fn exit_if_requested(&self, event_loop: &ActiveEventLoop) {
        if self.app.should_exit() {
            event_loop.exit();
        }
    }
}

impl<D> ApplicationHandler for Driver<D>
where
    D: AppDelegate<DesktopBackend>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let format = self.app.settings().default_window_format().clone();
        match self.app.create_window(event_loop, &format) {
            Ok(_) => self.delegate.setup(&mut self.app, event_loop),
            Err(e) => {
                log::error!("failed to create default window: {e}");
                self.failure = Some(e.into());
                event_loop.exit();
                return;
            }
        }

        // An explicit quit requested during prepare_settings still goes
        // through the veto protocol before anything is torn down.
        if self.app.settings().should_quit() && self.app.quit() == QuitDecision::Approved {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let id = WindowId::from_raw(u64::from(window_id));
        match event {
            WindowEvent::CloseRequested => {
                self.app.close_window(id);
                self.delegate.window_closed(&mut self.app, id);
            }
            WindowEvent::Focused(focused) => {
                self.app.backend_mut().note_focus(id, focused);
            }
            _ => {}
        }
        self.exit_if_requested(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.should_exit() {
            event_loop.exit();
            return;
        }

        if self.app.is_frame_rate_enabled() {
            // Self-paced: tick at the target rate, sleep in between.
            let interval = self.app.backend().frame_interval();
            let now = Instant::now();
            if self.next_frame.is_none_or(|due| now >= due) {
                self.delegate.update(&mut self.app);
                for window in self.app.windows() {
                    window.request_redraw();
                }
                self.next_frame = Some(now + interval);
            }
            if let Some(due) = self.next_frame {
                event_loop.set_control_flow(ControlFlow::WaitUntil(due));
            }
        } else {
            // Uncapped: run as fast as the platform drives the loop.
            self.delegate.update(&mut self.app);
            for window in self.app.windows() {
                window.request_redraw();
            }
            self.next_frame = None;
            event_loop.set_control_flow(ControlFlow::Poll);
        }

        self.exit_if_requested(event_loop);
    }
}
