mod config;
mod store;

use std::rc::Rc;
use std::time::Duration;

use anyhow::*;
use clap::{Arg, ArgMatches, Command};
use log::*;

use loginpage::dom::{ids, Document, Element};
use loginpage::feedback;
use loginpage::field::{Field, FieldState};
use loginpage::headless::Headless;
use loginpage::storage::MemoryStore;
use loginpage::{LoginPage, PageConfig};

use crate::store::FileStore;

pub fn main() -> Result<()> {
	env_logger::init();

	let app = Command::new("loginpage")
		.about("Drive the login page behaviour without a browser")
		.arg(Arg::new("config").long("config").takes_value(true).global(true)
			.help("Page config JSON (default ~/.config/loginpage/config.json)"))
		.subcommand_required(true)
		.subcommand(Command::new("check")
			.about("Type values into the fields and report what the page shows")
			.arg(Arg::new("username").long("username").short('u').takes_value(true))
			.arg(Arg::new("password").long("password").short('p').takes_value(true)))
		.subcommand(Command::new("remember")
			.about("Show, set or clear the remembered username")
			.arg(Arg::new("user").long("user").takes_value(true))
			.arg(Arg::new("forget").long("forget").conflicts_with("user")))
		.subcommand(Command::new("config")
			.about("Print the effective page config"))
		.subcommand(Command::new("timeline")
			.about("Print when each entrance animation starts"))
	;

	let opts = app.get_matches();
	debug!("cli opts: {:?}", &opts);
	let page_config = config::load(opts.get_one::<String>("config").map(String::as_str))?;

	match opts.subcommand() {
		Some(("check", sub)) => check(sub, page_config),
		Some(("remember", sub)) => remember(sub, page_config),
		Some(("config", _)) => {
			println!("{}", serde_json::to_string_pretty(&page_config)?);
			Ok(())
		},
		Some(("timeline", _)) => {
			timeline(page_config);
			Ok(())
		},
		_ => Err(anyhow!("Unknown command")),
	}
}

fn booted(headless: &Headless) -> Rc<LoginPage> {
	let page = LoginPage::boot(headless.ctx.clone());
	headless.page.fire_ready();
	page
}

fn describe(headless: &Headless, field: Field) -> String {
	let state = feedback::field_state(&headless.ctx, field);
	let message = headless.ctx.element(field.error_id())
		.map(|slot| slot.text())
		.unwrap_or_default();
	match state {
		FieldState::Valid => "ok".to_owned(),
		FieldState::Invalid => format!("invalid ({})", message),
		FieldState::Neutral => "unchecked".to_owned(),
	}
}

fn check(opts: &ArgMatches, page_config: PageConfig) -> Result<()> {
	let headless = Headless::new(page_config);
	let _page = booted(&headless);

	let mut all_valid = true;
	for field in [Field::Username, Field::Password] {
		if let Some(value) = opts.get_one::<String>(field.key()) {
			headless.page.type_into(field.input_id(), value);
			println!("{}: {}", field.key(), describe(&headless, field));
			all_valid &= feedback::field_state(&headless.ctx, field) == FieldState::Valid;
		}
	}
	if all_valid {
		Ok(())
	} else {
		Err(anyhow!("Validation failed"))
	}
}

fn remember(opts: &ArgMatches, page_config: PageConfig) -> Result<()> {
	let store = FileStore::user();
	let headless = Headless::with_store(Rc::new(store.clone()), page_config);
	let page = booted(&headless);
	let username = headless.ctx.element(ids::USERNAME).ok_or_else(|| anyhow!("no username field"))?;
	let checkbox = headless.ctx.element(ids::REMEMBER).ok_or_else(|| anyhow!("no remember checkbox"))?;

	if let Some(user) = opts.get_one::<String>("user") {
		username.set_value(user);
		checkbox.set_checked(true);
		page.save_remember_me();
	} else if opts.contains_id("forget") {
		checkbox.set_checked(false);
		page.save_remember_me();
	}

	// what the next page load sees
	let reloaded = Headless::with_store(Rc::new(store.clone()), headless.ctx.config.clone());
	let _next = booted(&reloaded);
	match reloaded.ctx.element(ids::USERNAME).map(|e| e.value()).filter(|u| !u.is_empty()) {
		Some(user) => println!("Remembered: {}", user),
		None => println!("Nothing remembered ({})", store.path().to_string_lossy()),
	}
	Ok(())
}

fn timeline(page_config: PageConfig) {
	let headless = Headless::with_store(Rc::new(MemoryStore::new()), page_config);
	let _page = booted(&headless);
	let animated = headless.page.elements_by_class(&headless.ctx.config.animation.classes);
	let step = Duration::from_millis(headless.ctx.config.animation.stagger_ms.max(1));

	let mut shown = 0;
	headless.clock.advance(Duration::ZERO);
	loop {
		let visible = animated.iter().filter(|e| e.style("opacity") == "1").count();
		if visible != shown || headless.clock.now().is_zero() {
			println!("{:>6}ms  {}/{} visible", headless.clock.now().as_millis(), visible, animated.len());
			shown = visible;
		}
		if headless.clock.pending() == 0 {
			break;
		}
		headless.clock.advance(step);
	}
	println!("transition: {}", animated.first().map(|e| e.style("transition")).unwrap_or_default());
}
