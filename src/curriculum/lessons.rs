//! The guided course: six chapters walking from "what is a multiplexer"
//! through panes, windows, sessions, copy mode, and configuration.

use super::{Chapter, Lesson, ValidationRule};
use crate::engine::Action;

pub const CURRICULUM: &[Chapter] = &[
    Chapter {
        id: "welcome",
        title: "Welcome to tmux",
        description: "Get introduced to tmux and the fundamental concepts that make it indispensable for terminal power users.",
        lessons: &[
            Lesson {
                id: "what-is-tmux",
                title: "What is tmux?",
                description: "tmux is a terminal multiplexer: it lets you run multiple terminal sessions inside a single window. You can split your screen into panes, create tabs (called windows), and detach from a session and come back later with everything still running.",
                objective: "Read the introduction above, then press Enter to continue.",
                hints: &[
                    "Just press the Enter key to move on.",
                    "Hit Enter; no other input is needed for this step.",
                ],
                validation: ValidationRule::Action(Action::EnterPressed),
                congrats: "Great start! Now you know what tmux is: a terminal multiplexer that gives you superpowers in the terminal.",
            },
            Lesson {
                id: "first-session",
                title: "Your First Session",
                description: "Everything in tmux starts with a session. When you type `tmux`, a new session is created and you are attached to it. A green status bar appears at the bottom of the screen; that is how you know you are inside tmux.",
                objective: "Type `tmux` and press Enter to start a new session.",
                hints: &[
                    "Type the word tmux into the terminal.",
                    "Type `tmux` and hit Enter to launch a brand-new session.",
                    "Make sure you type exactly: tmux",
                ],
                validation: ValidationRule::Command("tmux"),
                congrats: "You just created your first tmux session! Notice the status bar at the bottom.",
            },
            Lesson {
                id: "prefix-key",
                title: "The Prefix Key",
                description: "tmux uses a special key combination called the prefix to avoid conflicts with other programs. The default prefix is Ctrl+b. You press Ctrl+b first, release it, and then press another key to tell tmux what to do.",
                objective: "Press Ctrl+b to activate the prefix.",
                hints: &[
                    "Hold Ctrl and press b at the same time.",
                    "Press Ctrl+b and then release both keys to arm the prefix.",
                ],
                validation: ValidationRule::Action(Action::PrefixActivated),
                congrats: "You activated the prefix key! Every tmux shortcut begins with Ctrl+b.",
            },
            Lesson {
                id: "command-line",
                title: "The Command Line",
                description: "tmux has its own built-in command prompt. Open it with Ctrl+b then : (colon) and type any tmux command directly, like `split-window` or `new-window`.",
                objective: "Press Ctrl+b then : to open the tmux command prompt.",
                hints: &[
                    "First press Ctrl+b (the prefix), then press the colon key (:).",
                    "Ctrl+b followed by Shift+; (which types a colon) opens the command line.",
                ],
                validation: ValidationRule::Action(Action::CommandModeEntered),
                congrats: "You opened the tmux command prompt! Press Escape to close it for now.",
            },
        ],
    },
    Chapter {
        id: "panes",
        title: "Panes - Split Your World",
        description: "Split your terminal into multiple panes so you can see and work on several things at once.",
        lessons: &[
            Lesson {
                id: "split-vertically",
                title: "Split Vertically",
                description: "Panes divide a single window into multiple sections. Ctrl+b then % splits the current pane vertically: two panes side by side. Perfect for editing code on one side and running it on the other.",
                objective: "Press Ctrl+b then % to split the pane vertically (side by side).",
                hints: &[
                    "Press Ctrl+b first, then press % (Shift+5 on most keyboards).",
                    "The prefix is Ctrl+b, then the percent sign % creates a vertical split.",
                ],
                validation: ValidationRule::Action(Action::PaneSplitHorizontal),
                congrats: "Nice split! In tmux, % creates a vertical divider (which tmux internally calls a \"horizontal\" split).",
            },
            Lesson {
                id: "split-horizontally",
                title: "Split Horizontally",
                description: "You can also split panes horizontally: one on top, one on the bottom. Press Ctrl+b then \" (double quote) to split the current pane into a top and bottom half.",
                objective: "Press Ctrl+b then \" to split the pane horizontally (top/bottom).",
                hints: &[
                    "Press Ctrl+b first, then press \" (Shift+' on most keyboards).",
                    "The prefix is Ctrl+b, then the double-quote key \" makes a horizontal split.",
                ],
                validation: ValidationRule::Action(Action::PaneSplitVertical),
                congrats: "You split horizontally! Combine splits to build any layout you want.",
            },
            Lesson {
                id: "navigate-panes",
                title: "Navigate Between Panes",
                description: "With multiple panes open, press Ctrl+b followed by an arrow key to move focus to another pane. The active pane is highlighted with a green border.",
                objective: "Press Ctrl+b then an arrow key to move to another pane.",
                hints: &[
                    "Press Ctrl+b, then press any arrow key.",
                    "Try Ctrl+b then the Right arrow if you have a pane to the right.",
                ],
                validation: ValidationRule::Action(Action::PaneNavigated),
                congrats: "You moved between panes! Use this constantly to jump around your workspace.",
            },
            Lesson {
                id: "resize-pane",
                title: "Resize a Pane",
                description: "Panes do not have to be equal sizes. Press Ctrl+b then hold Ctrl and press an arrow key to resize the active pane in that direction.",
                objective: "Press Ctrl+b then Ctrl+arrow to resize a pane.",
                hints: &[
                    "Press Ctrl+b (prefix), then hold Ctrl and press an arrow key.",
                    "Try Ctrl+b, then Ctrl+Right to make the current pane wider.",
                ],
                validation: ValidationRule::Action(Action::PaneResized),
                congrats: "Pane resized! Fine-tune your layout to fit your workflow.",
            },
            Lesson {
                id: "zoom-pane",
                title: "Zoom a Pane",
                description: "Sometimes you need to focus on just one pane. Press Ctrl+b then z to zoom the current pane to fill the entire window. Press the same combo again to restore the layout.",
                objective: "Press Ctrl+b then z to toggle zoom on the active pane.",
                hints: &[
                    "Press Ctrl+b, then press z.",
                    "Ctrl+b then z expands the pane; press it again to unzoom.",
                ],
                validation: ValidationRule::Action(Action::PaneZoomed),
                congrats: "Zoomed! Handy when you need to focus on one thing without losing your layout.",
            },
            Lesson {
                id: "close-pane",
                title: "Close a Pane",
                description: "Press Ctrl+b then x to close the active pane (tmux asks for confirmation). You can also type `exit` in the pane. When the last pane in a window closes, the window closes too.",
                objective: "Press Ctrl+b then x to close the current pane.",
                hints: &[
                    "Press Ctrl+b, then press x.",
                    "After Ctrl+b then x, tmux asks you to confirm; press y.",
                ],
                validation: ValidationRule::Action(Action::PaneClosed),
                congrats: "Pane closed! You have mastered the full pane lifecycle.",
            },
        ],
    },
    Chapter {
        id: "windows",
        title: "Windows - Multiple Workspaces",
        description: "Use windows as tabs inside tmux to organize different tasks within a single session.",
        lessons: &[
            Lesson {
                id: "create-window",
                title: "Create a Window",
                description: "Windows in tmux are like tabs in a browser. Each window has its own set of panes and runs independently. Press Ctrl+b then c to create a new window.",
                objective: "Press Ctrl+b then c to create a new window.",
                hints: &[
                    "Press Ctrl+b (prefix), then press c.",
                    "c stands for \"create.\" Look at the status bar to see the new window.",
                ],
                validation: ValidationRule::Action(Action::WindowCreated),
                congrats: "New window created! Check the status bar; all your windows are listed there.",
            },
            Lesson {
                id: "switch-windows",
                title: "Switch Windows",
                description: "Cycle through windows with Ctrl+b then n (next) or Ctrl+b then p (previous).",
                objective: "Press Ctrl+b then n or p to switch to the next or previous window.",
                hints: &[
                    "Press Ctrl+b, then press n to go to the next window.",
                    "Ctrl+b then p goes to the previous window.",
                ],
                validation: ValidationRule::Action(Action::WindowSwitched),
                congrats: "You switched windows! Use n and p to quickly cycle through your workspaces.",
            },
            Lesson {
                id: "window-by-number",
                title: "Window by Number",
                description: "Each window has a number shown in the status bar (starting from 0). Press Ctrl+b then the number to jump directly to that window.",
                objective: "Press Ctrl+b then a number (0-9) to jump to a specific window.",
                hints: &[
                    "Press Ctrl+b, then press a number like 0 or 1.",
                    "Ctrl+b then 0 goes to the first window.",
                ],
                validation: ValidationRule::Action(Action::WindowSwitchedByNumber),
                congrats: "Direct jump! Switching by number is the fastest navigation once you know where you are going.",
            },
            Lesson {
                id: "rename-window",
                title: "Rename a Window",
                description: "Rename a window to something meaningful with Ctrl+b then , (comma). A prompt appears at the bottom where you can type the new name.",
                objective: "Press Ctrl+b then , to rename the current window.",
                hints: &[
                    "Press Ctrl+b, then press the comma key (,).",
                    "Clear the current name with Ctrl+u, type your new name, then Enter.",
                ],
                validation: ValidationRule::Action(Action::WindowRenamed),
                congrats: "Window renamed! Meaningful names make it much easier to stay organized.",
            },
            Lesson {
                id: "close-window",
                title: "Close a Window",
                description: "Press Ctrl+b then & to close the current window and all its panes, after a confirmation.",
                objective: "Press Ctrl+b then & to close the current window.",
                hints: &[
                    "Press Ctrl+b, then press & (Shift+7 on most keyboards).",
                    "tmux asks for confirmation; press y.",
                ],
                validation: ValidationRule::Action(Action::WindowClosed),
                congrats: "Window closed! You now know how to fully manage windows.",
            },
        ],
    },
    Chapter {
        id: "sessions",
        title: "Sessions - The Big Picture",
        description: "Manage sessions: the top-level containers that organize entire projects and persist your work.",
        lessons: &[
            Lesson {
                id: "detach-session",
                title: "Detach from Session",
                description: "The killer feature of tmux. Press Ctrl+b then d to detach from the current session. It keeps running in the background with all your windows and panes intact.",
                objective: "Press Ctrl+b then d to detach from the session.",
                hints: &[
                    "Press Ctrl+b (prefix), then press d.",
                    "d stands for \"detach.\" The session keeps running in the background.",
                ],
                validation: ValidationRule::Action(Action::SessionDetached),
                congrats: "You detached! The session is still running. This is what makes tmux essential for remote work.",
            },
            Lesson {
                id: "list-sessions",
                title: "List Sessions",
                description: "After detaching, type `tmux ls` to list all active sessions: name, window count, and creation time.",
                objective: "Type `tmux ls` to list all active sessions.",
                hints: &[
                    "Type tmux ls in the terminal and press Enter.",
                    "ls is short for list-sessions.",
                ],
                validation: ValidationRule::Command("tmux ls"),
                congrats: "Now you can see all running sessions! Each one persists until you explicitly kill it.",
            },
            Lesson {
                id: "named-session",
                title: "Create Named Session",
                description: "Give sessions meaningful names instead of auto-numbers. Type `tmux new -s work` to create a session named \"work.\"",
                objective: "Type `tmux new -s work` to create a named session.",
                hints: &[
                    "Type tmux new -s followed by a name.",
                    "The -s flag sets the session name. Try: tmux new -s work",
                ],
                validation: ValidationRule::Command("tmux new -s"),
                congrats: "Named session created! Use descriptive names to keep projects organized.",
            },
            Lesson {
                id: "attach-session",
                title: "Attach to Session",
                description: "Reconnect to a detached session with `tmux attach -t session-name` (or `tmux a -t name` for short).",
                objective: "Type `tmux attach -t` followed by a session name to reattach.",
                hints: &[
                    "Type tmux attach -t followed by the session name.",
                    "Try: tmux attach -t work",
                ],
                validation: ValidationRule::Command("tmux attach"),
                congrats: "You reattached! The detach/attach workflow is the heart of tmux.",
            },
        ],
    },
    Chapter {
        id: "copy-mode",
        title: "Copy Mode - Scrollback & Search",
        description: "Scroll through terminal output and search for text using tmux copy mode.",
        lessons: &[
            Lesson {
                id: "enter-copy-mode",
                title: "Enter Copy Mode",
                description: "By default you cannot scroll up in tmux like a normal terminal. Press Ctrl+b then [ to enter copy mode and browse previous output.",
                objective: "Press Ctrl+b then [ to enter copy mode.",
                hints: &[
                    "Press Ctrl+b (prefix), then press [ (left square bracket).",
                    "Once in copy mode, try using the arrow keys to scroll.",
                ],
                validation: ValidationRule::Action(Action::CopyModeEntered),
                congrats: "You are in copy mode! You can now scroll through your terminal history.",
            },
            Lesson {
                id: "exit-copy-mode",
                title: "Exit Copy Mode",
                description: "When you are done, press q or Escape to leave copy mode. Copy mode is read-only, so nothing there affects running programs.",
                objective: "Press q or Escape to exit copy mode.",
                hints: &[
                    "Press the q key to quit copy mode.",
                    "Escape works too.",
                ],
                validation: ValidationRule::Action(Action::CopyModeExited),
                congrats: "You exited copy mode! Browse your terminal history whenever you need to.",
            },
        ],
    },
    Chapter {
        id: "pro-tips",
        title: "Pro Tips & Customization",
        description: "Customize tmux and make it truly your own with configuration files.",
        lessons: &[
            Lesson {
                id: "tmux-conf",
                title: "The .tmux.conf File",
                description: "tmux is highly customizable through ~/.tmux.conf: change the prefix key, enable mouse support, rebind split keys, and more.",
                objective: "Run `cat ~/.tmux.conf` to view the tmux configuration file.",
                hints: &[
                    "Type cat ~/.tmux.conf and press Enter.",
                    "This displays the contents of the tmux config file.",
                ],
                validation: ValidationRule::Command("cat ~/.tmux.conf"),
                congrats: "Now you know where tmux keeps its configuration!",
            },
            Lesson {
                id: "congratulations",
                title: "Congratulations!",
                description: "You have completed the interactive tutorial! You can create and manage sessions, split your terminal into panes, organize work with windows, scroll with copy mode, and customize tmux. The more you practice, the more natural it becomes.",
                objective: "Press Enter to finish the tutorial.",
                hints: &[
                    "Just press Enter to wrap things up!",
                ],
                validation: ValidationRule::Action(Action::EnterPressed),
                congrats: "You did it! Go forth and multiplex. Remember: Ctrl+b is your best friend.",
            },
        ],
    },
];
