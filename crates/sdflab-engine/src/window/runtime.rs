use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Inner size in logical pixels.
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { title: "sdflab".to_string(), initial_size: LogicalSize::new(800.0, 800.0) }
    }
}

/// Runs one window with a continuously redrawn frame loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window, drives `app` until it exits or the window closes,
    /// then tears down the app before the GPU context and the window.
    ///
    /// Fails when the event loop, the window or the GPU context cannot be
    /// created, or when [`App::on_gpu_ready`] or [`App::on_frame`] fails.
    pub fn run<A: App + 'static>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut host = Host { config, gpu_init, app, session: None, closing: false, error: None };
        event_loop.run_app(&mut host).context("event loop failed")?;

        match host.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window plus everything that lives as long as it.
#[self_referencing]
struct Session {
    input: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    window: Window,
    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Host<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    // Fields drop in order: the app's GPU objects go before the device.
    session: Option<Session>,
    closing: bool,
    error: Option<anyhow::Error>,
}

impl<A: App + 'static> Host<A> {
    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(self.config.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create window")?;
        let gpu_init = self.gpu_init.clone();

        let session = SessionTryBuilder {
            input: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::new(),
            window,
            gpu_builder: |window| pollster::block_on(Gpu::new(window, gpu_init)).context("GPU initialization failed"),
        }
        .try_build()?;

        let app = &mut self.app;
        session.with(|s| app.on_gpu_ready(&WindowCtx { id: s.window.id(), window: s.window }, s.gpu))?;

        session.with_window(|w| {
            log::info!("window {:?} open", w.id());
            w.request_redraw();
        });
        self.session = Some(session);
        Ok(())
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.closing = true;
        event_loop.exit();
    }

    /// Reconfigures the surface to `size`, or to the window's current inner size.
    fn resize(&mut self, size: Option<PhysicalSize<u32>>) {
        if let Some(session) = self.session.as_mut() {
            let size = size.unwrap_or_else(|| session.with_window(|w| w.inner_size()));
            session.with_gpu_mut(|gpu| gpu.resize(size));
        }
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let Some(session) = self.session.as_mut() else {
            return Ok(AppControl::Continue);
        };
        let app = &mut self.app;

        session.with_mut(|s| {
            let mut ctx = FrameCtx {
                window: WindowCtx { id: s.window.id(), window: s.window },
                gpu: s.gpu,
                input: s.input,
                input_frame: s.input_frame,
                time: s.clock.tick(),
            };
            let control = app.on_frame(&mut ctx);
            s.input_frame.clear();
            control
        })
    }
}

impl<A: App + 'static> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() || self.closing {
            return;
        }
        if let Err(err) = self.open(event_loop) {
            log::error!("{err:#}");
            self.error = Some(err);
            self.close(event_loop);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.as_ref() {
            session.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.closing {
            return;
        }
        let app = &mut self.app;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let control = session.with_mut(|s| {
            if let Some(ev) = translate_window_event(s.window.scale_factor(), &event) {
                s.input.apply(s.input_frame, ev);
            }
            app.on_window_event(window_id, &event)
        });
        if control == AppControl::Exit {
            self.close(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close(event_loop),
            WindowEvent::Resized(size) => self.resize(Some(size)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("scale factor {scale_factor}");
                self.resize(None);
            }
            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(AppControl::Continue) => {}
                Ok(AppControl::Exit) => self.close(event_loop),
                Err(err) => {
                    self.error = Some(err);
                    self.close(event_loop);
                }
            },
            _ => {}
        }
    }
}
