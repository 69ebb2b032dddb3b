use std::io::{self, Write};

pub const MAX_INPUT_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Item(usize),
    Back,
}

/// Numbered selection prompt. Empty input (or `0`) steps back; invalid input
/// retries up to `MAX_INPUT_RETRIES` times before giving up and stepping back.
pub fn choose(title: &str, hint: &str, items: &[String], back_hint: &str) -> Choice {
    let mut attempts = 0;
    loop {
        println!("\n{title} ({back_hint}):");
        for (index, item) in items.iter().enumerate() {
            println!(" {}. {item}", index + 1);
        }

        let Some(answer) = read_answer(hint) else {
            return Choice::Back;
        };
        match parse_answer(&answer, items.len()) {
            Some(choice) => return choice,
            None => {
                attempts += 1;
                if attempts >= MAX_INPUT_RETRIES {
                    return Choice::Back;
                }
                println!("Wrong input. Try again");
            }
        }
    }
}

pub fn prompt(label: &str) -> Option<String> {
    let answer = read_answer(label)?;
    if answer.is_empty() { None } else { Some(answer) }
}

fn read_answer(label: &str) -> Option<String> {
    print!("\n{label}: ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(answer.trim().to_string()),
    }
}

fn parse_answer(answer: &str, item_count: usize) -> Option<Choice> {
    if answer.is_empty() || answer == "0" {
        return Some(Choice::Back);
    }
    let number: usize = answer.parse().ok()?;
    if (1..=item_count).contains(&number) {
        Some(Choice::Item(number - 1))
    } else {
        None
    }
}
