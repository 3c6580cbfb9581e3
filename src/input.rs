//! Per-frame input collected from winit window events.
//!
//! Edges (press/release) last for one frame and are cleared by
//! [`InputState::end_frame`]; held state persists.

use cgmath::Vector2;
use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Clone)]
pub struct InputState {
    cursor: Vector2<f32>,
    left_down: bool,
    left_pressed: bool,
    left_released: bool,
    keys_pressed: Vec<KeyCode>,
    resized: Option<(u32, u32)>,
    focused: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            cursor: Vector2::new(0.0, 0.0),
            left_down: false,
            left_pressed: false,
            left_released: false,
            keys_pressed: Vec::new(),
            resized: None,
            focused: true,
        }
    }

    /// Feed a window event. Returns `true` if the event was used.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.key(*code, *state);
            }
            WindowEvent::Resized(size) => {
                self.resized(size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                self.focused = *focused;
            }
            _ => return false,
        }
        true
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = Vector2::new(x, y);
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                if !self.left_down {
                    self.left_pressed = true;
                }
                self.left_down = true;
            }
            ElementState::Released => {
                if self.left_down {
                    self.left_released = true;
                }
                self.left_down = false;
            }
        }
    }

    pub fn key(&mut self, code: KeyCode, state: ElementState) {
        if state == ElementState::Pressed && !self.keys_pressed.contains(&code) {
            self.keys_pressed.push(code);
        }
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        self.resized = Some((width, height));
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn cursor(&self) -> Vector2<f32> {
        self.cursor
    }

    pub fn left_down(&self) -> bool {
        self.left_down
    }

    /// Left button went down this frame
    pub fn left_pressed(&self) -> bool {
        self.left_pressed
    }

    /// Left button came up this frame
    pub fn left_released(&self) -> bool {
        self.left_released
    }

    pub fn key_pressed(&self, code: KeyCode) -> bool {
        self.keys_pressed.contains(&code)
    }

    /// Latest size reported this frame
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.resized.take()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn end_frame(&mut self) {
        self.left_pressed = false;
        self.left_released = false;
        self.keys_pressed.clear();
        self.resized = None;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
