//! Pause, settings and debug menus.
//!
//! [`MenuNav`] is the button-list state machine; the plugin only renders the current page and
//! feeds clicks and `Escape` presses into it.

use bevy::{app::AppExit, input::common_conditions::input_just_pressed, prelude::*};

use crate::{
    prelude::*,
    settings::{Settings, Toggle},
    state::GameState,
};

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuNav>().add_systems(
            Update,
            (
                handle_escape.run_if(
                    input_just_pressed(KeyCode::Escape)
                        .and(in_state(GameState::Running).or(in_state(GameState::Paused))),
                ),
                handle_menu_clicks.run_if(in_state(GameState::Paused)),
                (sync_game_state, rebuild_menu)
                    .chain()
                    .run_if(resource_changed::<MenuNav>),
            )
                .chain(),
        );
    }
}

// ——> STATE MACHINE

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuPage {
    Pause,
    Settings,
    Debug,
}

impl MenuPage {
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            MenuPage::Pause => &["Resume", "Settings", "Quit"],
            MenuPage::Settings => &["Toggle Lines", "Debug Options", "Return"],
            MenuPage::Debug => &["Grid Markers", "Debug Text", "Debug Chunk Renderer", "Return"],
        }
    }
}

/// What a button click asks the rest of the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Resume,
    Open(MenuPage),
    Toggle(Toggle),
    Quit,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MenuNav {
    paused: bool,
    current: Option<MenuPage>,
    /// page reopened on the next pause
    last: Option<MenuPage>,
}

impl Default for MenuNav {
    fn default() -> Self {
        Self {
            paused: false,
            current: None,
            last: Some(MenuPage::Pause),
        }
    }
}

impl MenuNav {
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// the page on screen, if paused
    #[inline]
    pub fn page(&self) -> Option<MenuPage> {
        self.current.filter(|_| self.paused)
    }

    /// `Escape`: unpause remembering the page, or pause on the remembered page.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.paused = true;
            self.current = Some(self.last.unwrap_or(MenuPage::Pause));
        }
    }

    /// Unpauses; the page on screen is the one the next pause opens on.
    pub fn resume(&mut self) {
        self.last = self.current;
        self.paused = false;
    }

    /// Dispatches a click on button `index` of the current page.
    ///
    /// Navigation and resuming are applied here, toggles and quitting are left to the caller.
    pub fn select(&mut self, index: usize) -> Option<MenuAction> {
        let action = match (self.page()?, index) {
            (MenuPage::Pause, 0) => MenuAction::Resume,
            (MenuPage::Pause, 1) => MenuAction::Open(MenuPage::Settings),
            (MenuPage::Pause, 2) => MenuAction::Quit,
            (MenuPage::Settings, 0) => MenuAction::Toggle(Toggle::DrawLines),
            (MenuPage::Settings, 1) => MenuAction::Open(MenuPage::Debug),
            (MenuPage::Settings, 2) => MenuAction::Open(MenuPage::Pause),
            (MenuPage::Debug, 0) => MenuAction::Toggle(Toggle::GridMarkers),
            (MenuPage::Debug, 1) => MenuAction::Toggle(Toggle::DebugText),
            (MenuPage::Debug, 2) => MenuAction::Toggle(Toggle::ChunkRenderer),
            (MenuPage::Debug, 3) => MenuAction::Open(MenuPage::Settings),
            _ => return None,
        };

        match action {
            MenuAction::Resume => self.resume(),
            MenuAction::Open(page) => self.current = Some(page),
            MenuAction::Toggle(_) | MenuAction::Quit => (),
        }
        Some(action)
    }
}

// ——> SYSTEMS

fn handle_escape(mut nav: ResMut<MenuNav>) {
    nav.toggle_pause();
    debug!("escape pressed, menu: {:?}", nav.page());
}

fn handle_menu_clicks(
    query: Query<(&Interaction, &MenuButton), (Changed<Interaction>, With<Button>)>,
    mut nav: ResMut<MenuNav>,
    mut settings: ResMut<Settings>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match nav.select(button.0) {
            Some(MenuAction::Toggle(toggle)) => {
                settings.flip(toggle);
            }
            Some(MenuAction::Quit) => {
                info!("quitting");
                exit.send(AppExit::Success);
            }
            Some(action) => debug!("menu action {action:?}"),
            None => (),
        }
    }
}

fn sync_game_state(
    nav: Res<MenuNav>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    match (state.get(), nav.is_paused()) {
        (GameState::Running, true) => {
            info!("paused");
            next_state.set(GameState::Paused);
        }
        (GameState::Paused, false) => {
            info!("resumed");
            next_state.set(GameState::Running);
        }
        _ => (),
    }
}

fn rebuild_menu(mut commands: Commands, nav: Res<MenuNav>, roots: Query<Entity, With<MenuRoot>>) {
    for root in roots.iter() {
        commands.entity(root).despawn_recursive();
    }

    let Some(page) = nav.page() else {
        return;
    };

    commands
        .spawn((
            MenuRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(MENU_BUTTON_SPACING),
                ..default()
            },
            BackgroundColor(PAUSE_DIM_COLOR),
            GlobalZIndex(10),
        ))
        .with_children(|parent| {
            for (i, label) in page.labels().iter().enumerate() {
                parent
                    .spawn((
                        Button,
                        MenuButton(i),
                        Node {
                            width: Val::Px(MENU_BUTTON_SIZE.x),
                            height: Val::Px(MENU_BUTTON_SIZE.y),
                            border: UiRect::all(Val::Px(2.0)),
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            ..default()
                        },
                        BorderColor(Color::BLACK),
                        BackgroundColor(MENU_BUTTON_COLOR),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(*label),
                            TextFont {
                                font_size: 20.0,
                                ..default()
                            },
                            TextColor(Color::BLACK),
                        ));
                    });
            }
        });
}

// ——> COMPONENTS

#[derive(Component)]
struct MenuRoot;

/// index of the button on its page
#[derive(Component, Debug, Clone, Copy)]
struct MenuButton(usize);
