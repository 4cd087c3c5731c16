use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    Quit,
    SelectWeather(WeatherCategory),
    ToggleNight,
    Auto,
    CyclePerformance,
}

pub(super) fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'c'))
}

fn key_command(key: KeyEvent) -> Option<KeyCommand> {
    if key.code == KeyCode::Esc || is_ctrl_c(key) {
        return Some(KeyCommand::Quit);
    }
    match command_char(key)? {
        'q' => Some(KeyCommand::Quit),
        digit @ '1'..='6' => {
            let index = (digit as usize) - ('1' as usize);
            WeatherCategory::ALL.get(index).copied().map(KeyCommand::SelectWeather)
        }
        'n' => Some(KeyCommand::ToggleNight),
        'a' => Some(KeyCommand::Auto),
        'p' => Some(KeyCommand::CyclePerformance),
        _ => None,
    }
}

impl AppState {
    pub(crate) async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(command) = key_command(key) {
                    self.run_command(command, tx).await?;
                }
            }
            Event::Resize(cols, rows) => self.resize_viewport(cols, rows),
            _ => {}
        }
        Ok(())
    }

    async fn run_command(&mut self, command: KeyCommand, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match command {
            KeyCommand::Quit => tx.send(AppEvent::Quit).await?,
            KeyCommand::SelectWeather(category) => {
                // Picking a category keeps whichever half of the day is showing.
                let is_night = match self.mode {
                    WeatherMode::Manual(selection) => selection.is_night,
                    WeatherMode::Auto => self.resolved.is_night,
                };
                self.set_manual(ManualSelection { category, is_night });
            }
            KeyCommand::ToggleNight => {
                if let WeatherMode::Manual(selection) = self.mode {
                    self.set_manual(ManualSelection {
                        is_night: !selection.is_night,
                        ..selection
                    });
                }
            }
            KeyCommand::Auto => self.set_auto(tx),
            KeyCommand::CyclePerformance => self.cycle_tier(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_map_to_categories_in_order() {
        assert_eq!(
            key_command(press(KeyCode::Char('1'))),
            Some(KeyCommand::SelectWeather(WeatherCategory::ALL[0]))
        );
        assert_eq!(
            key_command(press(KeyCode::Char('6'))),
            Some(KeyCommand::SelectWeather(WeatherCategory::ALL[5]))
        );
        assert_eq!(key_command(press(KeyCode::Char('7'))), None);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key_command(press(KeyCode::Esc)), Some(KeyCommand::Quit));
        assert_eq!(key_command(press(KeyCode::Char('Q'))), Some(KeyCommand::Quit));
        assert_eq!(
            key_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyCommand::Quit)
        );
    }

    #[test]
    fn modified_letters_are_not_commands() {
        assert_eq!(
            key_command(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(key_command(press(KeyCode::Char('c'))), None);
    }
}
