mod guild_event;
mod leyline_user;
mod reaction_collector;
