//! Terminal rendering of notices, navigation and the session.

use shopfront_core::{Feedback, NoticeLevel, Session};

pub fn feedback(feedback: &Feedback) {
    if let Some(ref notice) = feedback.notice {
        match notice.level {
            NoticeLevel::Success => println!("✓ {}: {}", notice.title, notice.text),
            NoticeLevel::Error => eprintln!("✗ {}: {}", notice.title, notice.text),
        }
    }
    if let Some(route) = feedback.navigate {
        println!("→ {}", route);
    }
}

pub fn session(session: &Session) {
    if !session.is_logged_in() {
        println!("Not logged in");
        return;
    }
    println!("Account: {}", session.account());
    println!("Role:    {}", if session.is_admin() { "admin" } else { "member" });
    println!("Cart:    {}", session.cart());
    println!("Avatar:  {}", session.avatar_url());
}
