//! Autosplit: no fixed arrangement, just re-split the focused window along
//! its longer axis so the next insertion halves it the pleasant way. Runs
//! on focus changes as well as insertions.

use crate::context::Context;

pub fn arrange(ctx: &mut Context) {
    let rect = ctx.focused.rect;
    if rect.height > rect.width {
        ctx.exec("split vertical");
    } else {
        ctx.exec("split horizontal");
    }
}
