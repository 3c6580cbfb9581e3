//! Frame driver tying input, camera, picking and the solar system together.

use cgmath::{Vector2, Vector3};
use log::{debug, info};
use winit::{event::WindowEvent, keyboard::KeyCode};

use crate::{
    config::Config,
    gfx::{
        camera::{Camera, FlyCamera},
        frame::{LightUniform, RenderFrame, Renderer, RingUniform},
        picking::{DragController, Unprojector, Viewport},
    },
    input::InputState,
    simulation::{Planet, SimulationManager, SolarSystem},
    Error, Result,
};

/// Where the camera starts: above the orbital plane, looking toward the sun.
const CAMERA_START: [f32; 3] = [0.0, 20.0, 120.0];

pub struct Orrery {
    config: Config,
    camera: FlyCamera,
    simulation: SimulationManager<SolarSystem>,
    drag: DragController,
    input: InputState,
    viewport: Viewport,
    cursor_locked: bool,
    light_on: bool,
}

impl Orrery {
    pub fn new(config: Config) -> Result<Self> {
        let (width, height) = config.viewport;
        let viewport = Viewport::new(width, height)?;
        let camera = FlyCamera::new(CAMERA_START.into(), viewport.aspect());

        let mut simulation = SimulationManager::new();
        simulation.attach_simulation(SolarSystem::standard(config.box_half_size));

        Ok(Self {
            camera,
            simulation,
            drag: DragController::from_config(&config),
            input: InputState::new(),
            viewport,
            cursor_locked: config.cursor_locked,
            light_on: true,
            config,
        })
    }

    /// Forward a window event to the input state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.input.process_window_event(event)
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    /// Camera movement is up to the caller; picking follows whatever is set here.
    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    pub fn simulation_mut(&mut self) -> &mut SimulationManager<SolarSystem> {
        &mut self.simulation
    }

    pub fn solar_system(&self) -> Option<&SolarSystem> {
        self.simulation.simulation()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Index of the body currently held by the cursor
    pub fn dragged(&self) -> Option<usize> {
        self.drag.dragged()
    }

    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    pub fn is_light_on(&self) -> bool {
        self.light_on
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        match Viewport::new(width, height) {
            Ok(viewport) => {
                self.viewport = viewport;
                self.camera.resize_projection(width, height);
            }
            // Minimized windows report zero size; keep the last usable one.
            Err(err) => debug!("ignoring resize: {err}"),
        }
    }

    /// Cursor used for picking: the viewport center while the cursor is grabbed.
    pub fn pick_cursor(&self) -> Vector2<f32> {
        if self.cursor_locked {
            self.viewport.center()
        } else {
            self.input.cursor()
        }
    }

    /// Unprojector for the current camera and viewport.
    pub fn unprojector(&self) -> Result<Unprojector> {
        Unprojector::new(
            self.camera.view(),
            self.camera.projection(),
            self.viewport,
        )
    }

    /// Put every body back where it started. Any drag is released first.
    pub fn reset(&mut self) -> Result<()> {
        self.release_drag()?;
        self.simulation.reset();
        Ok(())
    }

    /// Replace the running solar system. Any drag is released first.
    pub fn attach_system(&mut self, system: SolarSystem) -> Result<()> {
        self.release_drag()?;
        self.simulation.attach_simulation(system);
        Ok(())
    }

    fn release_drag(&mut self) -> Result<()> {
        match self.simulation.simulation_mut() {
            Some(system) => {
                let planets = system.planets_mut();
                if !self.drag.discard_stale(planets) {
                    self.drag.end(planets)?;
                }
            }
            None => {
                self.drag.discard_stale::<Planet>(&[]);
            }
        }
        Ok(())
    }

    /// Advance one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> Result<()> {
        if !self.input.is_focused() {
            self.input.end_frame();
            return Ok(());
        }

        if let Some((width, height)) = self.input.take_resize() {
            self.resize(width, height);
        }
        self.handle_toggles();

        // Bodies may have been reset or replaced through `simulation_mut`.
        let planets = self.simulation.simulation().map_or(&[][..], |s| s.planets());
        self.drag.discard_stale(planets);

        self.simulation.update(dt);

        let unprojector = self.unprojector()?;
        let cursor = self.pick_cursor();
        let forward = self.camera.forward();

        if let Some(system) = self.simulation.simulation_mut() {
            let planets = system.planets_mut();

            if self.input.left_pressed() {
                if let Some(index) = self.drag.begin(&unprojector, cursor, forward, planets)? {
                    info!("dragging {}", planets[index].name);
                }
            } else if !self.input.left_down() && self.drag.is_dragging() {
                self.drag.end(planets)?;
            }

            if self.drag.is_dragging() && self.input.left_down() {
                self.drag.update(cursor, dt, planets)?;
            }

            system.hover(Some(&unprojector.ray(cursor)));
        }

        self.input.end_frame();
        Ok(())
    }

    fn handle_toggles(&mut self) {
        if self.input.key_pressed(KeyCode::Escape) {
            self.cursor_locked = !self.cursor_locked;
            debug!("cursor locked: {}", self.cursor_locked);
        }
        if self.input.key_pressed(KeyCode::KeyE) {
            self.light_on = !self.light_on;
            debug!("light on: {}", self.light_on);
        }
    }

    pub fn light_intensity(&self) -> f32 {
        if self.light_on {
            self.config.light_intensity
        } else {
            0.0
        }
    }

    /// Gather this frame's uniforms. The sun (first body) is the light source.
    pub fn render_frame(&self) -> RenderFrame {
        let (planets, light_position, ring) = match self.simulation.simulation() {
            Some(system) => (
                system.planets().iter().map(|p| p.uniform()).collect(),
                system.planets().first().map(|sun| sun.position),
                system.saturn_ring().map(RingUniform::from),
            ),
            None => (Vec::new(), None, None),
        };

        RenderFrame {
            camera: self.camera.uniform(),
            light: LightUniform::new(
                light_position.unwrap_or(Vector3::new(0.0, 0.0, 0.0)),
                self.light_intensity(),
            ),
            planets,
            ring,
        }
    }

    /// Build the frame and pass it to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<()> {
        let frame = self.render_frame();
        renderer.submit(&frame).map_err(Error::Renderer)
    }

    /// View-projection matrix the current frame is drawn with.
    pub fn view_projection(&self) -> cgmath::Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;
    use winit::event::{ElementState, MouseButton};

    const DT: f32 = 1.0 / 60.0;

    fn unlocked() -> Orrery {
        let config = Config {
            cursor_locked: false,
            ..Config::default()
        };
        Orrery::new(config).unwrap()
    }

    fn planets(orrery: &Orrery) -> &[crate::simulation::Planet] {
        orrery.solar_system().unwrap().planets()
    }

    fn press(orrery: &mut Orrery, x: f32, y: f32) {
        orrery.input_mut().cursor_moved(x, y);
        orrery.input_mut().mouse_button(MouseButton::Left, ElementState::Pressed);
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<RenderFrame>,
    }

    impl Renderer for Recorder {
        fn submit(&mut self, frame: &RenderFrame) -> anyhow::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Renderer for Broken {
        fn submit(&mut self, _frame: &RenderFrame) -> anyhow::Result<()> {
            anyhow::bail!("device lost")
        }
    }

    #[test]
    fn test_drag_earth_and_release() {
        let mut orrery = unlocked();
        orrery.camera_mut().position = Vector3::new(35.0, 0.0, 60.0);
        let center = orrery.viewport().center();

        press(&mut orrery, center.x, center.y);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.dragged(), Some(2));
        assert_eq!(planets(&orrery)[2].orbit.speed, 0.0);
        assert!(planets(&orrery)[2].dragging);
        assert_eq!(planets(&orrery).iter().filter(|p| p.dragging).count(), 1);

        let start = planets(&orrery)[2].position;
        orrery.input_mut().cursor_moved(center.x + 80.0, center.y);
        for _ in 0..30 {
            orrery.frame(DT).unwrap();
        }
        let moved = planets(&orrery)[2].position;
        assert!(moved.x > start.x + 1.0);
        assert!((moved.y - start.y).abs() < 1e-3);

        orrery.input_mut().mouse_button(MouseButton::Left, ElementState::Released);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.dragged(), None);
        assert_eq!(planets(&orrery)[2].orbit.speed, 10.0);
        assert!(!planets(&orrery)[2].dragging);
    }

    #[test]
    fn test_moon_keeps_orbiting_during_drag() {
        let mut orrery = unlocked();
        orrery.camera_mut().position = Vector3::new(35.0, 0.0, 60.0);
        let center = orrery.viewport().center();

        press(&mut orrery, center.x, center.y);
        orrery.frame(DT).unwrap();
        let moon_angle = planets(&orrery)[3].orbit.angle;
        orrery.frame(DT).unwrap();
        assert!(planets(&orrery)[3].orbit.angle > moon_angle);
    }

    fn grab_earth(orrery: &mut Orrery) {
        orrery.camera_mut().position = Vector3::new(35.0, 0.0, 60.0);
        let center = orrery.viewport().center();
        press(orrery, center.x, center.y);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.dragged(), Some(2));
    }

    fn assert_no_drag(orrery: &Orrery) {
        assert_eq!(orrery.dragged(), None);
        assert!(planets(orrery).iter().all(|p| !p.dragging));
        assert_eq!(planets(orrery)[2].orbit.speed, 10.0);
    }

    #[test]
    fn test_reset_during_drag_releases_body() {
        let mut orrery = unlocked();
        grab_earth(&mut orrery);

        orrery.reset().unwrap();
        assert_no_drag(&orrery);
        assert_eq!(planets(&orrery)[2].position, Vector3::new(35.0, 0.0, 0.0));

        // Still holding the button: the reset body orbits, nothing follows the cursor.
        orrery.input_mut().cursor_moved(900.0, 100.0);
        orrery.frame(DT).unwrap();
        assert_no_drag(&orrery);
        assert!(planets(&orrery)[2].orbit.angle > 0.0);
    }

    #[test]
    fn test_reset_through_manager_drops_stale_drag() {
        let mut orrery = unlocked();
        grab_earth(&mut orrery);

        orrery.simulation_mut().reset();
        orrery.frame(DT).unwrap();
        assert_no_drag(&orrery);
        assert!(planets(&orrery)[2].orbit.angle > 0.0);
    }

    #[test]
    fn test_attach_during_drag_releases_body() {
        let mut orrery = unlocked();
        grab_earth(&mut orrery);

        orrery.attach_system(SolarSystem::standard(60.0)).unwrap();
        assert_no_drag(&orrery);
        assert_eq!(orrery.solar_system().unwrap().box_half_size(), 60.0);
        orrery.frame(DT).unwrap();
        assert_no_drag(&orrery);
    }

    #[test]
    fn test_release_while_unfocused_ends_drag() {
        let mut orrery = unlocked();
        grab_earth(&mut orrery);

        orrery.input_mut().set_focused(false);
        orrery.input_mut().mouse_button(MouseButton::Left, ElementState::Released);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.dragged(), Some(2));

        orrery.input_mut().set_focused(true);
        orrery.frame(DT).unwrap();
        assert_no_drag(&orrery);
    }

    #[test]
    fn test_picking_matches_rendered_projection() {
        let mut orrery = unlocked();
        orrery.camera_mut().aspect = 1.0;
        orrery.camera_mut().position = Vector3::new(0.0, 0.0, 60.0);

        let frame = orrery.render_frame();
        let rendered = cgmath::Matrix4::from(frame.camera.view_proj);
        let picked = orrery.camera().projection() * orrery.camera().view();
        assert_eq!(rendered, picked);
        assert_eq!(orrery.camera().aspect, 1.0);

        // A body drawn at a pixel is the one picked there.
        let sun = planets(&orrery)[0].position.extend(1.0);
        let clip = rendered * sun;
        let viewport = orrery.viewport();
        let pixel = Vector2::new(
            (clip.x / clip.w + 1.0) * 0.5 * viewport.width as f32,
            (1.0 - clip.y / clip.w) * 0.5 * viewport.height as f32,
        );
        let ray = orrery.unprojector().unwrap().ray(pixel);
        let to_sun = (sun.truncate() - ray.origin).normalize();
        assert!(ray.direction.dot(to_sun) > 0.9999);
    }

    #[test]
    fn test_click_on_empty_space() {
        let mut orrery = unlocked();
        press(&mut orrery, 2.0, 2.0);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.dragged(), None);
        assert!(planets(&orrery).iter().all(|p| !p.dragging));
    }

    #[test]
    fn test_locked_cursor_picks_viewport_center() {
        let mut orrery = Orrery::new(Config::default()).unwrap();
        orrery.camera_mut().position = Vector3::new(0.0, 0.0, 60.0);
        // Far corner would miss, but the locked cursor aims at the sun.
        press(&mut orrery, 1.0, 1.0);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.dragged(), Some(0));
        assert!(planets(&orrery)[0].hovered);
    }

    #[test]
    fn test_toggles() {
        let mut orrery = Orrery::new(Config::default()).unwrap();
        assert!(orrery.is_cursor_locked());
        assert!(orrery.is_light_on());

        orrery.input_mut().key(KeyCode::Escape, ElementState::Pressed);
        orrery.input_mut().key(KeyCode::KeyE, ElementState::Pressed);
        orrery.frame(DT).unwrap();
        assert!(!orrery.is_cursor_locked());
        assert!(!orrery.is_light_on());
        assert_eq!(orrery.render_frame().light.intensity, 0.0);

        orrery.input_mut().key(KeyCode::KeyE, ElementState::Pressed);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.render_frame().light.intensity, 3.5);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut orrery = unlocked();
        orrery.input_mut().resized(0, 0);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.viewport(), Viewport::new(1280, 720).unwrap());

        orrery.input_mut().resized(800, 600);
        orrery.frame(DT).unwrap();
        assert_eq!(orrery.viewport(), Viewport::new(800, 600).unwrap());
        assert!((orrery.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_unfocused_window_is_frozen() {
        let mut orrery = unlocked();
        let before = planets(&orrery)[2].position;
        orrery.input_mut().set_focused(false);
        orrery.frame(1.0).unwrap();
        assert_eq!(planets(&orrery)[2].position, before);
    }

    #[test]
    fn test_render_submits_all_bodies() {
        let orrery = unlocked();
        let mut recorder = Recorder::default();
        orrery.render(&mut recorder).unwrap();

        let frame = &recorder.frames[0];
        assert_eq!(frame.planets.len(), 9);
        assert_eq!(frame.light.position, [0.0, 0.0, 0.0]);
        assert!(frame.ring.is_some());
        assert_eq!(frame.camera.view_position, [0.0, 20.0, 120.0, 1.0]);
    }

    #[test]
    fn test_renderer_errors_are_wrapped() {
        let orrery = unlocked();
        let err = orrery.render(&mut Broken).unwrap_err();
        assert!(matches!(err, Error::Renderer(_)));
        assert_eq!(err.to_string(), "renderer error: device lost");
    }
}
