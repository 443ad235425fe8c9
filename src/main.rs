fn main() {
    sling_siege::game::run();
}
