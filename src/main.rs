fn main() {
    questbot::run();
}
