use bevy::{input::common_conditions::input_just_pressed, prelude::*};

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Settings>().add_systems(
            Update,
            (
                toggle_lines.run_if(input_just_pressed(KeyCode::Digit1)),
                toggle_debug_text.run_if(input_just_pressed(KeyCode::Digit2)),
                toggle_chunk_renderer.run_if(input_just_pressed(KeyCode::Digit3)),
            ),
        );
    }
}

/// Run-time toggles, flipped from the keyboard or the pause menu.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// gridlines instead of grid dots
    pub draw_lines: bool,
    pub debug_grid_markers: bool,
    pub debug_text: bool,
    pub debug_chunk_renderer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    DrawLines,
    GridMarkers,
    DebugText,
    ChunkRenderer,
}

impl Settings {
    /// Flips a toggle and returns its new value.
    pub fn flip(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::DrawLines => &mut self.draw_lines,
            Toggle::GridMarkers => &mut self.debug_grid_markers,
            Toggle::DebugText => &mut self.debug_text,
            Toggle::ChunkRenderer => &mut self.debug_chunk_renderer,
        };
        *flag = !*flag;
        info!("{toggle:?} -> {}", *flag);
        *flag
    }
}

fn toggle_lines(mut settings: ResMut<Settings>) {
    settings.flip(Toggle::DrawLines);
}

fn toggle_debug_text(mut settings: ResMut<Settings>) {
    settings.flip(Toggle::DebugText);
}

fn toggle_chunk_renderer(mut settings: ResMut<Settings>) {
    settings.flip(Toggle::ChunkRenderer);
}

#[cfg(test)]
mod test {
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::state::GameState;

    #[test]
    fn keys_toggle_while_paused() {
        let mut app = App::new();
        app.add_plugins((StatesPlugin, SettingsPlugin))
            .insert_state(GameState::Paused)
            .init_resource::<ButtonInput<KeyCode>>();

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::Digit1);
        keys.press(KeyCode::Digit3);
        app.update();

        let settings = *app.world().resource::<Settings>();
        assert!(settings.draw_lines);
        assert!(!settings.debug_text);
        assert!(settings.debug_chunk_renderer);
    }

    #[test]
    fn flip_works() {
        let mut settings = Settings::default();
        assert!(settings.flip(Toggle::ChunkRenderer));
        assert!(settings.flip(Toggle::GridMarkers));
        assert!(!settings.flip(Toggle::GridMarkers));
        assert_eq!(
            Settings {
                draw_lines: false,
                debug_grid_markers: false,
                debug_text: false,
                debug_chunk_renderer: true,
            },
            settings
        );
    }
}
